//! Shared test mocks and utilities for the handball match tagger.

mod clock;
mod fixtures;
mod repository;

pub use clock::{FixedClock, ManualMatchClock};
pub use fixtures::{fixed_now, match_record};
pub use repository::{FailingRepository, InMemoryRepository};
