//! Shared application state.

use std::sync::Arc;

use handtag_tagging::application::event_store::EventStore;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The per-match event log, which also owns the wall clock and storage.
    pub store: Arc<EventStore>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }
}
