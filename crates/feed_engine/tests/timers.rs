use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use feed_engine::{EngineEvent, EngineHandle, Scheduler, StaticJobSource};
use swipe_core::JobListing;
use tokio::runtime::Handle;

fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl Fn() -> Vec<u64>) {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let reader = fired.clone();
    (fired, move || reader.lock().unwrap().clone())
}

#[tokio::test]
async fn timer_fires_after_delay() {
    let scheduler = Scheduler::new(Handle::current());
    let (fired, read) = recorder();
    let started = Instant::now();

    let sink = fired.clone();
    scheduler.schedule(1, Duration::from_millis(30), move |timer| {
        sink.lock().unwrap().push(timer);
    });
    assert_eq!(scheduler.pending(), 1);

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(read(), vec![1]);
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test]
async fn cancelled_timer_never_fires() {
    let scheduler = Scheduler::new(Handle::current());
    let (fired, read) = recorder();

    let sink = fired.clone();
    scheduler.schedule(5, Duration::from_millis(30), move |timer| {
        sink.lock().unwrap().push(timer);
    });
    assert!(scheduler.cancel(5));
    assert!(!scheduler.cancel(5));

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(read().is_empty());
}

#[tokio::test]
async fn dropping_the_scheduler_cancels_pending_timers() {
    let (fired, read) = recorder();
    {
        let scheduler = Scheduler::new(Handle::current());
        for timer in 1..=3 {
            let sink = fired.clone();
            scheduler.schedule(timer, Duration::from_millis(30), move |timer| {
                sink.lock().unwrap().push(timer);
            });
        }
    }
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(read().is_empty());
}

#[tokio::test]
async fn rescheduling_replaces_the_old_timer() {
    let scheduler = Scheduler::new(Handle::current());
    let (fired, read) = recorder();

    let first = fired.clone();
    scheduler.schedule(9, Duration::from_millis(20), move |_| {
        first.lock().unwrap().push(1);
    });
    let second = fired.clone();
    scheduler.schedule(9, Duration::from_millis(40), move |_| {
        second.lock().unwrap().push(2);
    });

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(read(), vec![2]);
}

#[test]
fn engine_delivers_jobs_and_timer_events() {
    let source = StaticJobSource::new(vec![JobListing::new("1", "DevOps Engineer", "CloudScale")]);
    let engine = EngineHandle::new(Arc::new(source));

    engine.fetch_jobs();
    match engine.recv_timeout(Duration::from_secs(2)) {
        Some(EngineEvent::JobsFetched(Ok(fetched))) => {
            assert_eq!(fetched.listings.len(), 1);
            assert_eq!(fetched.listings[0].title, "DevOps Engineer");
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.schedule_timer(11, Duration::from_millis(10));
    engine.schedule_timer(12, Duration::from_millis(10));
    engine.cancel_timer(12);
    assert_eq!(
        engine.recv_timeout(Duration::from_secs(2)),
        Some(EngineEvent::TimerElapsed { timer: 11 })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(100)), None);
}
