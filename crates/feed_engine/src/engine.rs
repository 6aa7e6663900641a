use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use feed_logging::{feed_debug, feed_error, feed_warn};
use swipe_core::TimerId;

use crate::fetch::JobSource;
use crate::scheduler::Scheduler;
use crate::EngineEvent;

enum EngineCommand {
    FetchJobs,
    Schedule { timer: TimerId, delay: Duration },
    Cancel { timer: TimerId },
    CancelAll,
}

/// Handle to the IO thread. Dropping it stops the thread and cancels every
/// pending timer, so no event is produced for a torn-down feed.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn JobSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    feed_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let scheduler = Scheduler::new(runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &scheduler, source.clone(), command, &event_tx);
            }
            feed_debug!("Engine command channel closed; cancelling timers");
            scheduler.cancel_all();
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_jobs(&self) {
        self.send(EngineCommand::FetchJobs);
    }

    pub fn schedule_timer(&self, timer: TimerId, delay: Duration) {
        self.send(EngineCommand::Schedule { timer, delay });
    }

    pub fn cancel_timer(&self, timer: TimerId) {
        self.send(EngineCommand::Cancel { timer });
    }

    pub fn cancel_all_timers(&self) {
        self.send(EngineCommand::CancelAll);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            feed_warn!("Engine thread is gone; command dropped");
        }
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    scheduler: &Scheduler,
    source: Arc<dyn JobSource>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchJobs => {
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = source.fetch_jobs().await;
                if let Err(err) = &result {
                    feed_warn!("Job fetch failed: {}", err);
                }
                let _ = event_tx.send(EngineEvent::JobsFetched(result));
            });
        }
        EngineCommand::Schedule { timer, delay } => {
            let event_tx = event_tx.clone();
            scheduler.schedule(timer, delay, move |timer| {
                let _ = event_tx.send(EngineEvent::TimerElapsed { timer });
            });
        }
        EngineCommand::Cancel { timer } => {
            if !scheduler.cancel(timer) {
                feed_debug!("Timer {} already fired or unknown", timer);
            }
        }
        EngineCommand::CancelAll => scheduler.cancel_all(),
    }
}
