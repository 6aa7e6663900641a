use std::time::Duration;

use crate::{JobId, TimerId, User};

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchJobs,
    /// Run a one-shot timer; the platform answers with `Msg::TimerFired`.
    ScheduleTimer { timer: TimerId, delay: Duration },
    CancelTimer { timer: TimerId },
    Notify(Notice),
    SubmitApplication { job_id: JobId },
    PersistSession(User),
    ClearSession,
}

/// User-facing notifications (toasts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Applied { title: String },
    Skipped,
    Saved { title: String },
    LoadFailed,
}
