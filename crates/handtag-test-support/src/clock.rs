//! Test clocks: deterministic `Clock` and `MatchClock` implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use handtag_core::clock::{Clock, MatchClock};

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A match clock moved by hand.
#[derive(Debug, Default)]
pub struct ManualMatchClock(AtomicU64);

impl ManualMatchClock {
    /// Creates a clock showing `elapsed_ms`.
    #[must_use]
    pub fn new(elapsed_ms: u64) -> Self {
        Self(AtomicU64::new(elapsed_ms))
    }

    /// Moves the clock forward.
    pub fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl MatchClock for ManualMatchClock {
    fn elapsed_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
