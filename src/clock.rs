//! Time sources for `last_accessed_at` bookkeeping.
//!
//! Timestamps are milliseconds since the Unix epoch. [`Stamper`] turns any
//! [`Clock`] into a strictly increasing sequence so that two commands issued
//! within the same millisecond still order correctly in the MRU cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests and replay tools.
///
/// Clones share the same time, so a test can keep a handle and advance the
/// clock a session owns.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Strictly increasing timestamps derived from a [`Clock`].
pub struct Stamper {
    clock: Box<dyn Clock>,
    last: i64,
}

impl Stamper {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last: i64::MIN,
        }
    }

    /// Never hand out a stamp at or below `floor` (e.g. the newest persisted entry).
    pub fn raise_floor(&mut self, floor: i64) {
        self.last = self.last.max(floor);
    }

    /// Next timestamp: the clock's time, bumped past the previous stamp if needed.
    pub fn stamp(&mut self) -> i64 {
        let now = self.clock.now_millis();
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

impl std::fmt::Debug for Stamper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stamper").field("last", &self.last).finish()
    }
}
