//! Handball tagger: Tagging bounded context.
//!
//! Responsible for the event model, the multi-tap shot recorder, the
//! append-only per-match event store, match lifecycle, and backup
//! import/export.

pub mod application;
pub mod domain;
