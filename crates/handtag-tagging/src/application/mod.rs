//! Application services for the Tagging context.

pub mod backup;
pub mod command_handlers;
pub mod event_store;
pub mod query_handlers;
pub mod session;
