//! Routes for the per-match event log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use handtag_core::error::DomainError;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use handtag_tagging::application::event_store::EventPatch;
use handtag_tagging::application::query_handlers;
use handtag_tagging::domain::events::{EventCandidate, MatchEvent};

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for POST /matches/{match_id}/events/undo.
#[derive(Debug, Serialize)]
pub struct UndoResponse {
    /// The removed event, or `null` when the log was already empty.
    pub undone: Option<MatchEvent>,
}

/// GET /matches/{match_id}/events
async fn list_events(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Vec<MatchEvent>>, ApiError> {
    let events = query_handlers::list_events(&state.store, match_id).await?;
    Ok(Json(events))
}

/// POST /matches/{match_id}/events
#[instrument(skip(state, candidate))]
async fn append_event(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(mut candidate): Json<EventCandidate>,
) -> Result<(StatusCode, Json<MatchEvent>), ApiError> {
    match candidate.match_id {
        Some(owner) if owner != match_id => {
            return Err(DomainError::Validation(format!(
                "event belongs to match {owner}, not {match_id}"
            ))
            .into());
        }
        _ => candidate.match_id = Some(match_id),
    }

    let event = state.store.append(candidate).await?;
    info!(event_id = %event.id, "event recorded");

    Ok((StatusCode::CREATED, Json(event)))
}

/// POST /matches/{match_id}/events/undo
#[instrument(skip(state))]
async fn undo_last(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<UndoResponse>, ApiError> {
    let undone = state.store.undo_last(match_id).await?;
    Ok(Json(UndoResponse { undone }))
}

/// PATCH /events/{event_id}
#[instrument(skip(state, event_patch))]
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(event_patch): Json<EventPatch>,
) -> Result<Json<MatchEvent>, ApiError> {
    let event = state.store.update(event_id, &event_patch).await?;
    Ok(Json(event))
}

/// DELETE /events/{event_id}
#[instrument(skip(state))]
async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<MatchEvent>, ApiError> {
    let event = state.store.delete(event_id).await?;
    Ok(Json(event))
}

/// Returns the router for the event log.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches/{match_id}/events", get(list_events).post(append_event))
        .route("/matches/{match_id}/events/undo", post(undo_last))
        .route("/events/{event_id}", patch(update_event).delete(delete_event))
}
