//! Handball tagger: Statistics bounded context.
//!
//! Derives everything a coach reviews after the match from the event log:
//! period scoping and the per-phase, per-bucket summary. Nothing here is
//! stored; every figure is recomputed on read.

pub mod application;
pub mod domain;
