//! Clock abstractions for determinism.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of elapsed match time.
///
/// Running, pausing and switching periods belong to the caller. The only
/// contract is that successive calls never go backwards.
pub trait MatchClock: Send + Sync {
    /// Elapsed match-clock milliseconds.
    fn elapsed_ms(&self) -> u64;
}
