//! Domain model for the Statistics context.

pub mod scope;
pub mod summary;
