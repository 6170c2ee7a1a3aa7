//! Routes for backup export and import.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use handtag_tagging::application::backup::{self, MatchBackup};
use handtag_tagging::application::command_handlers::{self, ImportReport};
use handtag_tagging::domain::commands::{ImportEvents, ImportMode};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /matches/{match_id}/import.
///
/// A whole exported backup is accepted as-is: its extra fields are ignored
/// and the mode defaults to `MERGE`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Raw events, current or legacy shape.
    pub events: Vec<serde_json::Value>,
    /// `MERGE` appends after the existing log, `REPLACE` drops it first.
    #[serde(default)]
    pub mode: ImportMode,
}

/// GET /matches/{match_id}/export
async fn export_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchBackup>, ApiError> {
    let backup = backup::export_match(&state.store, match_id).await?;
    Ok(Json(backup))
}

/// POST /matches/{match_id}/import
#[instrument(skip(state, request), fields(count = request.events.len()))]
async fn import_events(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportReport>, ApiError> {
    let command = ImportEvents {
        correlation_id: Uuid::new_v4(),
        match_id,
        events: request.events,
        mode: request.mode,
    };

    info!(correlation_id = %command.correlation_id, "handling import_events command");

    let report = command_handlers::handle_import_events(&command, &state.store).await?;
    Ok(Json(report))
}

/// Returns the router for backups.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches/{match_id}/export", get(export_match))
        .route("/matches/{match_id}/import", post(import_events))
}
