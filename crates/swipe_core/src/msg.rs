use crate::{JobId, JobListing, Point, TimerId, User};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Feed page mounted; triggers the initial load.
    FeedMounted,
    /// Job source answered with the full candidate sequence.
    JobsLoaded(Vec<JobListing>),
    /// Job source failed (network error or non-success status).
    JobsFailed { message: String },
    /// User pressed the retry affordance on the empty state.
    RetryClicked,
    /// Viewport reported the fraction of the sentinel currently visible.
    SentinelVisibility { fraction: f32 },
    /// Pointer or touch pressed on a card.
    PointerDown { job_id: JobId, pos: Point },
    PointerMoved { job_id: JobId, pos: Point },
    PointerUp { job_id: JobId },
    /// Mouse left the card while pressed; treated like a release.
    PointerLeft { job_id: JobId },
    SkipClicked { job_id: JobId },
    ApplyClicked { job_id: JobId },
    SaveClicked { job_id: JobId },
    DetailsOpened { job_id: JobId },
    DetailsClosed,
    DetailsApplyClicked,
    DetailsSaveClicked,
    /// A timer scheduled through `Effect::ScheduleTimer` elapsed.
    TimerFired { timer: TimerId },
    /// A card was torn down by the host before its exit completed.
    CardUnmounted { job_id: JobId },
    /// The whole feed page was torn down.
    FeedUnmounted,
    LoggedIn(User),
    LoggedOut,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
