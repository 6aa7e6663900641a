//! Per-card swipe gesture tracking.
//!
//! `GestureTracker` turns raw pointer positions into either a committed swipe
//! or a snap-back. It knows nothing about rendering or timers: a commit only
//! records the direction, and the owner is expected to call
//! [`GestureTracker::complete_exit`] once the exit animation has played.

use std::time::Duration;

/// Horizontal offset that must be exceeded for a drag to commit.
pub const COMMIT_THRESHOLD: f32 = 100.0;
/// Degrees of rotation per unit of horizontal offset.
pub const ROTATION_PER_UNIT: f32 = 0.1;
/// Horizontal offset at which the overlay reaches full opacity.
pub const OPACITY_RANGE: f32 = 100.0;
/// Horizontal offset past which the APPLY/SKIP label is revealed.
pub const OVERLAY_REVEAL: f32 = 50.0;
/// Delay between a commit and the emission of its outcome.
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);
/// Horizontal travel of the exit animation.
pub const EXIT_TRAVEL: f32 = 400.0;
/// Final rotation (degrees) of the exit animation.
pub const EXIT_ROTATION: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Emitted exactly once per committed card. Right means apply, left means skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub direction: SwipeDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub origin: Option<Point>,
    pub offset: Point,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Committed(SwipeDirection),
}

/// Result of feeding a pointer move into the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    Moved(Point),
    /// The move was mostly vertical; the drag was dropped so the page can scroll.
    YieldedToScroll,
    Ignored,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    Committed(SwipeDirection),
    Cancelled,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureTracker {
    phase: GesturePhase,
    drag: DragState,
    retired: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn offset(&self) -> Point {
        self.drag.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn committed_direction(&self) -> Option<SwipeDirection> {
        match self.phase {
            GesturePhase::Committed(direction) => Some(direction),
            _ => None,
        }
    }

    /// True once the card has committed; it no longer accepts input.
    pub fn is_spent(&self) -> bool {
        self.retired || matches!(self.phase, GesturePhase::Committed(_))
    }

    /// Starts a drag. Returns false when the tracker is not idle.
    pub fn begin(&mut self, pos: Point) -> bool {
        if self.phase != GesturePhase::Idle || self.retired {
            return false;
        }
        self.phase = GesturePhase::Dragging;
        self.drag = DragState {
            origin: Some(pos),
            offset: Point::ZERO,
            active: true,
        };
        true
    }

    pub fn update(&mut self, pos: Point) -> DragUpdate {
        if self.phase != GesturePhase::Dragging {
            return DragUpdate::Ignored;
        }
        let Some(origin) = self.drag.origin else {
            return DragUpdate::Ignored;
        };
        let offset = pos - origin;
        if offset.y.abs() > offset.x.abs() {
            self.reset();
            return DragUpdate::YieldedToScroll;
        }
        self.drag.offset = offset;
        DragUpdate::Moved(offset)
    }

    pub fn end(&mut self) -> GestureEnd {
        if self.phase != GesturePhase::Dragging {
            return GestureEnd::Ignored;
        }
        let x = self.drag.offset.x;
        if x.abs() > COMMIT_THRESHOLD {
            let direction = if x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            self.enter_committed(direction);
            GestureEnd::Committed(direction)
        } else {
            self.reset();
            GestureEnd::Cancelled
        }
    }

    /// Commits without pointer tracking (Skip/Apply buttons). Returns false if
    /// the card already committed.
    pub fn commit(&mut self, direction: SwipeDirection) -> bool {
        if self.is_spent() {
            return false;
        }
        self.enter_committed(direction);
        true
    }

    /// Finishes the exit animation. Yields the outcome once; later calls return `None`.
    pub fn complete_exit(&mut self) -> Option<SwipeOutcome> {
        let direction = self.committed_direction()?;
        self.phase = GesturePhase::Idle;
        self.retired = true;
        Some(SwipeOutcome { direction })
    }

    pub fn rotation_deg(&self) -> f32 {
        self.drag.offset.x * ROTATION_PER_UNIT
    }

    pub fn overlay_opacity(&self) -> f32 {
        (self.drag.offset.x.abs() / OPACITY_RANGE).clamp(0.0, 1.0)
    }

    /// Which label the overlay shows at the current offset, if any.
    pub fn overlay(&self) -> Option<SwipeDirection> {
        let x = self.drag.offset.x;
        if x > OVERLAY_REVEAL {
            Some(SwipeDirection::Right)
        } else if x < -OVERLAY_REVEAL {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    fn enter_committed(&mut self, direction: SwipeDirection) {
        self.phase = GesturePhase::Committed(direction);
        self.drag = DragState::default();
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.drag = DragState::default();
    }
}

/// Final (x, rotation) of the exit animation for a committed direction.
pub fn exit_pose(direction: SwipeDirection) -> (f32, f32) {
    (
        direction.sign() * EXIT_TRAVEL,
        direction.sign() * EXIT_ROTATION,
    )
}
