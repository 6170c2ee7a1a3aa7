//! Handball tagger HTTP API.
//!
//! Exposes the match lifecycle, the event log, statistics and backups over
//! JSON. The binary in `main.rs` wires it to a `SQLite` database.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::matches::router())
        .merge(routes::events::router())
        .merge(routes::stats::router())
        .merge(routes::backup::router());

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", api)
        .with_state(state)
}
