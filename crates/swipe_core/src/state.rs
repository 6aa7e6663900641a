use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::gesture::{DragUpdate, GestureEnd, GesturePhase, GestureTracker, EXIT_ANIMATION};
use crate::pager::{AdvanceTicket, FeedPager, PagerConfig};
use crate::view_model::{AppViewModel, CardView, DetailsView, FeedStatus};
use crate::{Effect, JobId, JobListing, Notice, Point, SessionContext, SwipeDirection, User};

pub type TimerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotStarted,
    Fetching,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
enum PendingTimer {
    CardExit(JobId),
    PagerAdvance(AdvanceTicket),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct CardState {
    gesture: GestureTracker,
    saved: bool,
    exit_timer: Option<TimerId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionContext,
    pager: FeedPager<JobListing>,
    cards: BTreeMap<JobId, CardState>,
    dismissed: BTreeSet<JobId>,
    timers: BTreeMap<TimerId, PendingTimer>,
    next_timer_id: TimerId,
    load_status: LoadStatus,
    selected: Option<JobId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PagerConfig) -> Self {
        Self {
            pager: FeedPager::new(config),
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    pub fn view(&self) -> AppViewModel {
        let cards = self
            .pager
            .window()
            .iter()
            .filter(|listing| !self.dismissed.contains(&listing.id))
            .map(|listing| {
                let card = self.cards.get(&listing.id);
                CardView::new(
                    listing,
                    card.map(|c| &c.gesture),
                    card.is_some_and(|c| c.saved),
                )
            })
            .collect();

        let details = self.selected.as_ref().and_then(|job_id| {
            self.listing(job_id).map(|listing| {
                let saved = self.cards.get(job_id).is_some_and(|c| c.saved);
                DetailsView::new(listing, saved)
            })
        });

        AppViewModel {
            status: self.feed_status(),
            user_name: self.session.user().map(|u| u.name.clone()),
            cards,
            show_sentinel: self.pager.has_more(),
            show_skeletons: self.load_status == LoadStatus::Fetching || self.pager.is_busy(),
            details,
            dirty: self.dirty,
        }
    }

    /// Returns whether state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn pager(&self) -> &FeedPager<JobListing> {
        &self.pager
    }

    pub fn card_phase(&self, job_id: &JobId) -> Option<GesturePhase> {
        self.cards.get(job_id).map(|c| c.gesture.phase())
    }

    pub fn is_dismissed(&self, job_id: &JobId) -> bool {
        self.dismissed.contains(job_id)
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    fn feed_status(&self) -> FeedStatus {
        match self.load_status {
            LoadStatus::NotStarted | LoadStatus::Fetching if self.pager.source().is_empty() => {
                FeedStatus::Loading
            }
            LoadStatus::Failed if self.pager.source().is_empty() => FeedStatus::Failed,
            _ if self.pager.source().is_empty() => FeedStatus::Empty,
            _ if self.pager.is_caught_up() => FeedStatus::CaughtUp,
            _ => FeedStatus::Browsing,
        }
    }

    fn listing(&self, job_id: &JobId) -> Option<&JobListing> {
        self.pager.window().iter().find(|l| &l.id == job_id)
    }

    fn is_interactive(&self, job_id: &JobId) -> bool {
        !self.dismissed.contains(job_id) && self.listing(job_id).is_some()
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn schedule(&mut self, purpose: PendingTimer, delay: std::time::Duration) -> (TimerId, Effect) {
        self.next_timer_id += 1;
        let timer = self.next_timer_id;
        self.timers.insert(timer, purpose);
        (timer, Effect::ScheduleTimer { timer, delay })
    }

    fn cancel_all_timers(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.timers)
            .into_keys()
            .map(|timer| Effect::CancelTimer { timer })
            .collect()
    }

    /// Returns false if a fetch is already in flight.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.load_status == LoadStatus::Fetching {
            return false;
        }
        self.load_status = LoadStatus::Fetching;
        self.mark_dirty();
        true
    }

    /// Replaces the feed atomically: per-card state and timers tied to the old
    /// source are discarded before the pager is re-initialized.
    pub(crate) fn apply_loaded(&mut self, listings: Vec<JobListing>) -> Vec<Effect> {
        let effects = self.cancel_all_timers();
        self.cards.clear();
        self.dismissed.clear();
        self.selected = None;
        self.pager.initialize(dedupe_by_id(listings));
        self.load_status = LoadStatus::Loaded;
        self.mark_dirty();
        effects
    }

    pub(crate) fn apply_failed(&mut self) -> bool {
        if self.load_status != LoadStatus::Fetching {
            return false;
        }
        self.load_status = LoadStatus::Failed;
        self.mark_dirty();
        true
    }

    pub(crate) fn sentinel_visibility(&mut self, fraction: f32) -> Option<Effect> {
        let ticket = self.pager.sentinel_visibility_changed(fraction)?;
        let delay = self.pager.config().load_delay;
        let (_, effect) = self.schedule(PendingTimer::PagerAdvance(ticket), delay);
        self.mark_dirty();
        Some(effect)
    }

    pub(crate) fn pointer_down(&mut self, job_id: JobId, pos: Point) {
        if !self.is_interactive(&job_id) {
            return;
        }
        let card = self.cards.entry(job_id).or_default();
        if card.gesture.begin(pos) {
            self.mark_dirty();
        }
    }

    pub(crate) fn pointer_moved(&mut self, job_id: &JobId, pos: Point) {
        let Some(card) = self.cards.get_mut(job_id) else {
            return;
        };
        match card.gesture.update(pos) {
            DragUpdate::Moved(_) | DragUpdate::YieldedToScroll => self.mark_dirty(),
            DragUpdate::Ignored => {}
        }
    }

    pub(crate) fn pointer_up(&mut self, job_id: &JobId) -> Option<Effect> {
        let card = self.cards.get_mut(job_id)?;
        match card.gesture.end() {
            GestureEnd::Committed(_) => {
                self.mark_dirty();
                Some(self.schedule_exit(job_id.clone()))
            }
            GestureEnd::Cancelled => {
                self.mark_dirty();
                None
            }
            GestureEnd::Ignored => None,
        }
    }

    pub(crate) fn commit_card(&mut self, job_id: JobId, direction: SwipeDirection) -> Option<Effect> {
        if !self.is_interactive(&job_id) {
            return None;
        }
        let card = self.cards.entry(job_id.clone()).or_default();
        if !card.gesture.commit(direction) {
            return None;
        }
        self.mark_dirty();
        Some(self.schedule_exit(job_id))
    }

    fn schedule_exit(&mut self, job_id: JobId) -> Effect {
        let (timer, effect) = self.schedule(PendingTimer::CardExit(job_id.clone()), EXIT_ANIMATION);
        if let Some(card) = self.cards.get_mut(&job_id) {
            card.exit_timer = Some(timer);
        }
        effect
    }

    /// Resolves an elapsed timer. Unknown timers (cancelled or stale) are ignored.
    pub(crate) fn timer_fired(&mut self, timer: TimerId) -> Vec<Effect> {
        match self.timers.remove(&timer) {
            Some(PendingTimer::CardExit(job_id)) => self.finish_card_exit(job_id),
            Some(PendingTimer::PagerAdvance(ticket)) => {
                self.pager.complete_advance(ticket);
                self.mark_dirty();
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn finish_card_exit(&mut self, job_id: JobId) -> Vec<Effect> {
        let Some(card) = self.cards.get_mut(&job_id) else {
            return Vec::new();
        };
        card.exit_timer = None;
        let Some(outcome) = card.gesture.complete_exit() else {
            return Vec::new();
        };
        let title = self
            .listing(&job_id)
            .map(|l| l.title.clone())
            .unwrap_or_default();
        if self.selected.as_ref() == Some(&job_id) {
            self.selected = None;
        }
        self.dismissed.insert(job_id.clone());
        self.mark_dirty();
        match outcome.direction {
            SwipeDirection::Right => vec![
                Effect::Notify(Notice::Applied { title }),
                Effect::SubmitApplication { job_id },
            ],
            SwipeDirection::Left => vec![Effect::Notify(Notice::Skipped)],
        }
    }

    /// Drops the card's gesture state; a pending exit is cancelled and its
    /// outcome never fires.
    pub(crate) fn unmount_card(&mut self, job_id: &JobId) -> Vec<Effect> {
        let Some(card) = self.cards.remove(job_id) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if let Some(timer) = card.exit_timer {
            self.timers.remove(&timer);
            effects.push(Effect::CancelTimer { timer });
        }
        if card.saved {
            self.cards.entry(job_id.clone()).or_default().saved = true;
        }
        self.mark_dirty();
        effects
    }

    pub(crate) fn unmount_feed(&mut self) -> Vec<Effect> {
        let effects = self.cancel_all_timers();
        self.pager.teardown();
        for card in self.cards.values_mut() {
            card.gesture = GestureTracker::new();
            card.exit_timer = None;
        }
        self.mark_dirty();
        effects
    }

    pub(crate) fn toggle_saved(&mut self, job_id: JobId) -> Option<Effect> {
        if !self.is_interactive(&job_id) {
            return None;
        }
        let title = self.listing(&job_id)?.title.clone();
        let card = self.cards.entry(job_id).or_default();
        card.saved = !card.saved;
        let saved = card.saved;
        self.mark_dirty();
        saved.then_some(Effect::Notify(Notice::Saved { title }))
    }

    pub(crate) fn open_details(&mut self, job_id: JobId) {
        if self.is_interactive(&job_id) {
            self.selected = Some(job_id);
            self.mark_dirty();
        }
    }

    pub(crate) fn close_details(&mut self) -> Option<JobId> {
        let closed = self.selected.take();
        if closed.is_some() {
            self.mark_dirty();
        }
        closed
    }

    pub(crate) fn selected(&self) -> Option<&JobId> {
        self.selected.as_ref()
    }

    pub(crate) fn login(&mut self, user: User) {
        self.session.login(user);
        self.mark_dirty();
    }

    pub(crate) fn logout(&mut self) -> bool {
        let was_signed_in = self.session.logout();
        if was_signed_in {
            self.mark_dirty();
        }
        was_signed_in
    }
}

/// Keeps the first occurrence of each id so per-card state stays one-to-one.
fn dedupe_by_id(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::with_capacity(listings.len());
    listings
        .into_iter()
        .filter(|listing| seen.insert(listing.id.clone()))
        .collect()
}
