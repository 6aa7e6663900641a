//! One-shot timers that belong to their owner and die with it.
//!
//! Each scheduled timer runs as a tokio task racing a sleep against its own
//! `CancellationToken`. A timer only reports once it has removed itself from
//! the pending table, so a cancel that lands while the sleep is completing
//! still wins: the callback never runs for a cancelled timer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use feed_logging::feed_trace;
use swipe_core::TimerId;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Pending timers keyed by id; the sequence number tells a replaced timer
/// apart from its replacement.
type PendingTable = Arc<Mutex<HashMap<TimerId, (u64, CancellationToken)>>>;

pub struct Scheduler {
    runtime: Handle,
    pending: PendingTable,
    next_seq: AtomicU64,
}

impl Scheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: Arc::default(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Runs `on_elapsed` after `delay` unless the timer is cancelled first.
    /// Rescheduling an id that is still pending replaces the old timer.
    pub fn schedule<F>(&self, timer: TimerId, delay: Duration, on_elapsed: F)
    where
        F: FnOnce(TimerId) + Send + 'static,
    {
        let token = CancellationToken::new();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        if let Some((_, previous)) = lock(&self.pending).insert(timer, (seq, token.clone())) {
            previous.cancel();
        }

        let pending = self.pending.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    feed_trace!("Timer {} cancelled", timer);
                }
                _ = tokio::time::sleep(delay) => {
                    let still_pending = {
                        let mut table = lock(&pending);
                        match table.get(&timer) {
                            Some((current, _)) if *current == seq => {
                                table.remove(&timer);
                                true
                            }
                            _ => false,
                        }
                    };
                    if still_pending {
                        on_elapsed(timer);
                    }
                }
            }
        });
    }

    /// Returns false if the timer already fired or was never scheduled.
    pub fn cancel(&self, timer: TimerId) -> bool {
        match lock(&self.pending).remove(&timer) {
            Some((_, token)) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, (_, token)) in lock(&self.pending).drain() {
            token.cancel();
        }
    }

    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn lock(table: &PendingTable) -> MutexGuard<'_, HashMap<TimerId, (u64, CancellationToken)>> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
