//! Application services for the Statistics context.

pub mod query_handlers;
