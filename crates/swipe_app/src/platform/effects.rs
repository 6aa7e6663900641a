use std::path::PathBuf;
use std::sync::Arc;

use feed_engine::{EngineEvent, EngineHandle, JobSource};
use feed_logging::{dispatch_seq, feed_debug, feed_info, feed_warn};
use swipe_core::{Effect, Msg};

use super::persistence;
use super::render::toast;

pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(source: Arc<dyn JobSource>, state_dir: PathBuf) -> Self {
        Self {
            engine: EngineHandle::new(source),
            state_dir,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchJobs => {
                    feed_info!("[#{}] Fetching jobs", dispatch_seq());
                    self.engine.fetch_jobs();
                }
                Effect::ScheduleTimer { timer, delay } => {
                    feed_debug!(
                        "[#{}] Schedule timer {} in {:?}",
                        dispatch_seq(),
                        timer,
                        delay
                    );
                    self.engine.schedule_timer(timer, delay);
                }
                Effect::CancelTimer { timer } => {
                    feed_debug!("[#{}] Cancel timer {}", dispatch_seq(), timer);
                    self.engine.cancel_timer(timer);
                }
                Effect::Notify(notice) => {
                    let text = toast(&notice);
                    feed_info!("[#{}] Notice: {}", dispatch_seq(), text);
                    println!("* {text}");
                }
                Effect::SubmitApplication { job_id } => {
                    // No apply endpoint exists yet; the intent is only recorded.
                    feed_info!("[#{}] Application submitted for job {}", dispatch_seq(), job_id);
                }
                Effect::PersistSession(user) => {
                    persistence::save_session(&self.state_dir, &user);
                }
                Effect::ClearSession => {
                    persistence::clear_session(&self.state_dir);
                }
            }
        }
    }

    /// Engine events received since the last call, translated into messages.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }

    pub fn shutdown(&self) {
        self.engine.cancel_all_timers();
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobsFetched(Ok(fetched)) => {
            let report = &fetched.report;
            if report.skipped > 0 || !report.fallbacks.is_empty() {
                feed_warn!(
                    "Decoded {} of {} records ({} skipped, {} field fallbacks)",
                    fetched.listings.len(),
                    report.records,
                    report.skipped,
                    report.fallbacks.len()
                );
            }
            Msg::JobsLoaded(fetched.listings)
        }
        EngineEvent::JobsFetched(Err(err)) => Msg::JobsFailed {
            message: err.to_string(),
        },
        EngineEvent::TimerElapsed { timer } => Msg::TimerFired { timer },
    }
}

#[cfg(test)]
mod tests {
    use feed_engine::{
        DecodeReport, FailureKind, FallbackReason, FetchError, FetchedJobs, FieldFallback,
    };
    use swipe_core::JobListing;

    use super::*;

    #[test]
    fn fetched_jobs_become_loaded_message() {
        let listing = JobListing::new("4", "Data Scientist", "DataMinds");
        let msg = map_event(EngineEvent::JobsFetched(Ok(FetchedJobs {
            listings: vec![listing.clone()],
            report: DecodeReport {
                records: 2,
                skipped: 1,
                fallbacks: vec![FieldFallback {
                    field: "job[0].benefits".to_string(),
                    reason: FallbackReason::Missing,
                }],
            },
        })));
        assert_eq!(msg, Msg::JobsLoaded(vec![listing]));
    }

    #[test]
    fn fetch_failure_keeps_its_description() {
        let msg = map_event(EngineEvent::JobsFetched(Err(FetchError {
            kind: FailureKind::HttpStatus(503),
            message: "service unavailable".to_string(),
        })));
        match msg {
            Msg::JobsFailed { message } => assert!(message.contains("service unavailable")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn elapsed_timer_becomes_timer_fired() {
        assert_eq!(
            map_event(EngineEvent::TimerElapsed { timer: 3 }),
            Msg::TimerFired { timer: 3 }
        );
    }
}
