//! Route modules organized by concern.

pub mod backup;
pub mod events;
pub mod health;
pub mod matches;
pub mod stats;
