use swipe_core::gesture::EXIT_ANIMATION;
use swipe_core::{
    DragUpdate, GestureEnd, GesturePhase, GestureTracker, Point, SwipeDirection, SwipeOutcome,
};

fn drag(to: (f32, f32)) -> (GestureTracker, DragUpdate, GestureEnd) {
    let mut tracker = GestureTracker::new();
    assert!(tracker.begin(Point::ZERO));
    let moved = tracker.update(Point::new(to.0, to.1));
    let ended = tracker.end();
    (tracker, moved, ended)
}

#[test]
fn drag_past_threshold_commits_right() {
    let (tracker, _, ended) = drag((150.0, 10.0));
    assert_eq!(ended, GestureEnd::Committed(SwipeDirection::Right));
    assert_eq!(tracker.phase(), GesturePhase::Committed(SwipeDirection::Right));
}

#[test]
fn drag_past_threshold_commits_left() {
    let (tracker, _, ended) = drag((-120.0, 5.0));
    assert_eq!(ended, GestureEnd::Committed(SwipeDirection::Left));
    assert_eq!(tracker.committed_direction(), Some(SwipeDirection::Left));
}

#[test]
fn short_drag_cancels_and_snaps_back() {
    let (tracker, moved, ended) = drag((30.0, 4.0));
    assert_eq!(moved, DragUpdate::Moved(Point::new(30.0, 4.0)));
    assert_eq!(ended, GestureEnd::Cancelled);
    assert_eq!(tracker.phase(), GesturePhase::Idle);
    assert_eq!(tracker.offset(), Point::ZERO);
    assert!(!tracker.drag().active);
}

#[test]
fn threshold_is_exclusive() {
    for x in [100.0, -100.0, 99.9, 0.0] {
        let (tracker, _, ended) = drag((x, 0.0));
        assert_eq!(ended, GestureEnd::Cancelled, "offset {x}");
        assert_eq!(tracker.offset(), Point::ZERO);
    }
    let (_, _, ended) = drag((100.5, 0.0));
    assert_eq!(ended, GestureEnd::Committed(SwipeDirection::Right));
}

#[test]
fn vertical_move_yields_to_scroll() {
    let mut tracker = GestureTracker::new();
    tracker.begin(Point::ZERO);
    assert_eq!(tracker.update(Point::new(20.0, 80.0)), DragUpdate::YieldedToScroll);
    assert_eq!(tracker.phase(), GesturePhase::Idle);
    assert_eq!(tracker.offset(), Point::ZERO);
    assert_eq!(tracker.drag().origin, None);

    // Nothing was recorded, so releasing is not a commit or a cancel.
    assert_eq!(tracker.end(), GestureEnd::Ignored);
}

#[test]
fn vertical_move_after_horizontal_progress_never_commits() {
    let mut tracker = GestureTracker::new();
    tracker.begin(Point::ZERO);
    tracker.update(Point::new(150.0, 0.0));
    assert_eq!(
        tracker.update(Point::new(150.0, 200.0)),
        DragUpdate::YieldedToScroll
    );
    assert_eq!(tracker.end(), GestureEnd::Ignored);
    assert_eq!(tracker.committed_direction(), None);
}

#[test]
fn begin_is_ignored_while_dragging() {
    let mut tracker = GestureTracker::new();
    assert!(tracker.begin(Point::new(10.0, 10.0)));
    assert!(!tracker.begin(Point::new(500.0, 500.0)));
    assert_eq!(
        tracker.update(Point::new(60.0, 20.0)),
        DragUpdate::Moved(Point::new(50.0, 10.0))
    );
}

#[test]
fn update_and_end_ignored_when_idle() {
    let mut tracker = GestureTracker::new();
    assert_eq!(tracker.update(Point::new(200.0, 0.0)), DragUpdate::Ignored);
    assert_eq!(tracker.end(), GestureEnd::Ignored);
    assert_eq!(tracker.phase(), GesturePhase::Idle);
}

#[test]
fn visuals_follow_horizontal_offset() {
    let mut tracker = GestureTracker::new();
    tracker.begin(Point::ZERO);

    tracker.update(Point::new(40.0, 10.0));
    assert!((tracker.rotation_deg() - 4.0).abs() < 1e-4);
    assert!((tracker.overlay_opacity() - 0.4).abs() < 1e-6);
    assert_eq!(tracker.overlay(), None);

    tracker.update(Point::new(-250.0, 0.0));
    assert!((tracker.rotation_deg() + 25.0).abs() < 1e-4);
    assert_eq!(tracker.overlay_opacity(), 1.0);
    assert_eq!(tracker.overlay(), Some(SwipeDirection::Left));

    tracker.update(Point::new(75.0, 0.0));
    assert_eq!(tracker.overlay(), Some(SwipeDirection::Right));
}

#[test]
fn committed_card_emits_outcome_exactly_once() {
    let (mut tracker, _, _) = drag((150.0, 10.0));
    assert_eq!(
        tracker.complete_exit(),
        Some(SwipeOutcome {
            direction: SwipeDirection::Right
        })
    );
    assert_eq!(tracker.complete_exit(), None);
    assert_eq!(tracker.phase(), GesturePhase::Idle);
}

#[test]
fn committed_card_rejects_further_input() {
    let (mut tracker, _, _) = drag((-150.0, 0.0));
    assert!(!tracker.begin(Point::ZERO));
    assert!(!tracker.commit(SwipeDirection::Right));
    assert_eq!(tracker.committed_direction(), Some(SwipeDirection::Left));

    tracker.complete_exit();
    assert!(tracker.is_spent());
    assert!(!tracker.begin(Point::ZERO));
    assert!(!tracker.commit(SwipeDirection::Left));
}

#[test]
fn programmatic_commit_skips_pointer_tracking() {
    let mut tracker = GestureTracker::new();
    assert!(tracker.commit(SwipeDirection::Left));
    assert_eq!(tracker.phase(), GesturePhase::Committed(SwipeDirection::Left));
    assert_eq!(
        tracker.complete_exit().map(|o| o.direction),
        Some(SwipeDirection::Left)
    );
}

#[test]
fn exit_animation_is_three_hundred_millis() {
    assert_eq!(EXIT_ANIMATION.as_millis(), 300);
}
