//! Routes for the match lifecycle.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use handtag_core::repository::MatchRecord;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use handtag_tagging::application::{command_handlers, query_handlers};
use handtag_tagging::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /matches.
#[derive(Debug, Deserialize)]
pub struct StartMatchRequest {
    /// Home (tagged) team name.
    pub home_team: String,
    /// Opponent team name.
    pub away_team: String,
    /// Day the match is played, `YYYY-MM-DD`.
    pub match_date: NaiveDate,
}

/// POST /matches
#[instrument(skip(state, request))]
async fn start_match(
    State(state): State<AppState>,
    Json(request): Json<StartMatchRequest>,
) -> Result<(StatusCode, Json<MatchRecord>), ApiError> {
    let command = commands::StartMatch {
        correlation_id: Uuid::new_v4(),
        home_team: request.home_team,
        away_team: request.away_team,
        match_date: request.match_date,
    };

    info!(correlation_id = %command.correlation_id, "handling start_match command");

    let record =
        command_handlers::handle_start_match(&command, state.store.clock(), state.store.storage())
            .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /matches
async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    let matches = query_handlers::list_matches(&state.store).await?;
    Ok(Json(matches))
}

/// GET /matches/{match_id}
async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<query_handlers::MatchView>, ApiError> {
    let view = query_handlers::get_match_by_id(&state.store, match_id).await?;
    Ok(Json(view))
}

/// POST /matches/{match_id}/finish
#[instrument(skip(state))]
async fn finish_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchRecord>, ApiError> {
    let command = commands::FinishMatch {
        correlation_id: Uuid::new_v4(),
        match_id,
    };

    info!(correlation_id = %command.correlation_id, "handling finish_match command");

    let record =
        command_handlers::handle_finish_match(&command, state.store.clock(), state.store.storage())
            .await?;

    Ok(Json(record))
}

/// DELETE /matches/{match_id}
#[instrument(skip(state))]
async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteMatch {
        correlation_id: Uuid::new_v4(),
        match_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_match command");

    command_handlers::handle_delete_match(&command, &state.store).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the match lifecycle.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches", post(start_match).get(list_matches))
        .route("/matches/{match_id}", get(get_match).delete(delete_match))
        .route("/matches/{match_id}/finish", post(finish_match))
}
