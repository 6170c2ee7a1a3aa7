//! Handtag Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the tagging and
//! statistics contexts depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod projection;
pub mod repository;
