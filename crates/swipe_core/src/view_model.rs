use crate::gesture::{exit_pose, GestureTracker, Point, SwipeDirection};
use crate::listing::{company_initials, format_posted_date, FullDescription, MatchTier};
use crate::{JobId, JobListing};

/// Number of skill badges shown on a card before collapsing into "+N more".
pub const SKILL_PREVIEW_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Loading,
    /// Load finished but the backend returned no jobs; offers a retry.
    Empty,
    /// Load failed; offers a retry.
    Failed,
    Browsing,
    /// Every listing is in the window ("You're all caught up").
    CaughtUp,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub status: FeedStatus,
    pub user_name: Option<String>,
    pub cards: Vec<CardView>,
    pub show_sentinel: bool,
    pub show_skeletons: bool,
    pub details: Option<DetailsView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub initials: String,
    pub company_logo: Option<String>,
    pub match_score: u8,
    pub match_tier: MatchTier,
    pub location: String,
    pub salary_range: String,
    pub job_type: String,
    pub posted: String,
    pub skills: Vec<String>,
    pub more_skills: usize,
    pub description: String,
    pub offset: Point,
    pub rotation_deg: f32,
    pub overlay: Option<SwipeDirection>,
    pub overlay_opacity: f32,
    pub dragging: bool,
    /// Set while the exit animation plays; the card is about to leave the feed.
    pub exiting: Option<SwipeDirection>,
    /// Target (x, rotation) of the exit animation.
    pub exit_pose: Option<(f32, f32)>,
    pub saved: bool,
}

impl CardView {
    pub(crate) fn new(listing: &JobListing, gesture: Option<&GestureTracker>, saved: bool) -> Self {
        let idle = GestureTracker::new();
        let gesture = gesture.unwrap_or(&idle);
        let exiting = gesture.committed_direction();
        let overlay = gesture.overlay();

        Self {
            job_id: listing.id.clone(),
            title: listing.title.clone(),
            company: listing.company.clone(),
            initials: company_initials(&listing.company),
            company_logo: listing.company_logo.clone(),
            match_score: listing.match_score.value(),
            match_tier: listing.match_score.tier(),
            location: listing.location.clone(),
            salary_range: listing.salary_range.clone(),
            job_type: listing.job_type.clone(),
            posted: posted_label(listing),
            skills: listing
                .skills
                .iter()
                .take(SKILL_PREVIEW_LIMIT)
                .cloned()
                .collect(),
            more_skills: listing.skills.len().saturating_sub(SKILL_PREVIEW_LIMIT),
            description: listing.description.clone(),
            offset: gesture.offset(),
            rotation_deg: gesture.rotation_deg(),
            overlay,
            overlay_opacity: if overlay.is_some() {
                gesture.overlay_opacity()
            } else {
                0.0
            },
            dragging: gesture.is_dragging(),
            exiting,
            exit_pose: exiting.map(exit_pose),
            saved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_range: String,
    pub job_type: String,
    pub posted: String,
    pub match_score: u8,
    pub benefits: Vec<String>,
    pub qualifications: Vec<String>,
    pub full_description: FullDescription,
    pub apply_url: Option<String>,
    pub saved: bool,
}

impl DetailsView {
    pub(crate) fn new(listing: &JobListing, saved: bool) -> Self {
        Self {
            job_id: listing.id.clone(),
            title: listing.title.clone(),
            company: listing.company.clone(),
            location: listing.location.clone(),
            salary_range: listing.salary_range.clone(),
            job_type: listing.job_type.clone(),
            posted: posted_label(listing),
            match_score: listing.match_score.value(),
            benefits: listing.details.benefits.clone(),
            qualifications: listing.details.qualifications.clone(),
            full_description: listing.details.full_description.clone(),
            apply_url: listing.details.apply_url.clone(),
            saved,
        }
    }
}

fn posted_label(listing: &JobListing) -> String {
    match (listing.posted_date, &listing.posted_ago) {
        (None, Some(ago)) => ago.clone(),
        (date, _) => format_posted_date(date),
    }
}
