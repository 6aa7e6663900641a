//! Swipe feed core: pure gesture and pagination state machines plus view-model helpers.
mod effect;
pub mod gesture;
mod listing;
mod msg;
pub mod pager;
mod session;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice};
pub use gesture::{
    DragState, DragUpdate, GestureEnd, GesturePhase, GestureTracker, Point, SwipeDirection,
    SwipeOutcome,
};
pub use listing::{
    company_initials, format_posted_date, FullDescription, JobDetails, JobId, JobListing,
    MatchScore, MatchTier,
};
pub use msg::Msg;
pub use pager::{AdvanceTicket, FeedPager, PagerConfig};
pub use session::{SessionContext, User};
pub use state::{AppState, LoadStatus, TimerId};
pub use update::update;
pub use view_model::{AppViewModel, CardView, DetailsView, FeedStatus, SKILL_PREVIEW_LIMIT};
