//! Routes for the Statistics bounded context.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use handtag_stats::application::query_handlers::{self, MatchSummary};
use handtag_stats::domain::scope::Scope;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /matches/{match_id}/summary.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// `ALL` (default), `PERIOD_1` or `PERIOD_2`.
    #[serde(default)]
    pub scope: Scope,
}

/// GET /matches/{match_id}/summary
async fn get_summary(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<MatchSummary>, ApiError> {
    let summary = query_handlers::summarize_match(&state.store, match_id, params.scope).await?;
    Ok(Json(summary))
}

/// Returns the router for the statistics context.
pub fn router() -> Router<AppState> {
    Router::new().route("/matches/{match_id}/summary", get(get_summary))
}
