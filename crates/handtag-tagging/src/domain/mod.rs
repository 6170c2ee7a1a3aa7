//! Domain model for the Tagging context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod recorder;
