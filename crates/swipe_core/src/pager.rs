//! Session-scoped incremental pagination over an in-memory source.
//!
//! The window is always a prefix of `source`, stored as its length. Advancing
//! is a two-step handshake: [`FeedPager::on_sentinel_visible`] hands out an
//! [`AdvanceTicket`] and latches `busy`; [`FeedPager::complete_advance`]
//! redeems it after the load delay. Tickets carry the generation they were
//! issued under, so a ticket that outlives a re-initialize or teardown is
//! discarded instead of appending to the new window.

use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.6;
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerConfig {
    pub batch_size: usize,
    /// Fraction of the sentinel that must be visible before advancing.
    pub visibility_threshold: f32,
    pub load_delay: Duration,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            load_delay: DEFAULT_LOAD_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedPager<T> {
    config: PagerConfig,
    source: Vec<T>,
    shown: usize,
    busy: bool,
    mounted: bool,
    generation: u64,
}

impl<T> FeedPager<T> {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config: PagerConfig {
                batch_size: config.batch_size.max(1),
                ..config
            },
            source: Vec::new(),
            shown: 0,
            busy: false,
            mounted: false,
            generation: 0,
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Replaces the source and shows its first batch. Any advance still in
    /// flight for the previous source is invalidated.
    pub fn initialize(&mut self, source: Vec<T>) {
        self.generation += 1;
        self.shown = self.config.batch_size.min(source.len());
        self.source = source;
        self.busy = false;
        self.mounted = true;
    }

    pub fn on_sentinel_visible(&mut self) -> Option<AdvanceTicket> {
        if !self.mounted || self.busy || self.shown >= self.source.len() {
            return None;
        }
        self.busy = true;
        Some(AdvanceTicket {
            generation: self.generation,
        })
    }

    /// Visibility callback from the viewport; applies the configured threshold.
    pub fn sentinel_visibility_changed(&mut self, visible_fraction: f32) -> Option<AdvanceTicket> {
        if visible_fraction.is_nan() || visible_fraction < self.config.visibility_threshold {
            return None;
        }
        self.on_sentinel_visible()
    }

    /// Appends the next batch. Returns how many items were appended (0 for a
    /// stale ticket or an exhausted source).
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> usize {
        if ticket.generation != self.generation || !self.busy {
            return 0;
        }
        self.busy = false;
        let next = self
            .shown
            .saturating_add(self.config.batch_size)
            .min(self.source.len());
        let appended = next - self.shown;
        self.shown = next;
        appended
    }

    /// Drops any pending advance and stops further ones until the next
    /// `initialize`. The window itself is kept.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.busy = false;
        self.mounted = false;
    }

    pub fn window(&self) -> &[T] {
        &self.source[..self.shown]
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.source.len()
    }

    pub fn is_caught_up(&self) -> bool {
        self.mounted && self.shown >= self.source.len()
    }
}

impl<T> Default for FeedPager<T> {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}
