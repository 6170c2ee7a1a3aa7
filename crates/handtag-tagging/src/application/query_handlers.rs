//! Query handlers for the Tagging context.

use chrono::{DateTime, NaiveDate, Utc};
use handtag_core::error::DomainError;
use handtag_core::projection::Projection;
use handtag_core::repository::{MatchRecord, MatchStatus};
use serde::Serialize;
use uuid::Uuid;

use crate::application::event_store::EventStore;
use crate::domain::aggregates::Scoreboard;
use crate::domain::events::MatchEvent;

/// Read model for a single match, with its score folded from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchView {
    /// Match identifier.
    pub match_id: Uuid,
    /// Tagged team.
    pub home_team: String,
    /// Opponent.
    pub away_team: String,
    /// Day the match is played.
    pub match_date: NaiveDate,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Goals folded from the current log.
    pub score: Scoreboard,
    /// Events currently in the log.
    pub event_count: usize,
    /// When the match was started.
    pub created_at: DateTime<Utc>,
    /// When the match record last changed.
    pub updated_at: DateTime<Utc>,
}

impl MatchView {
    fn build(record: MatchRecord, events: &[MatchEvent]) -> Self {
        Self {
            match_id: record.match_id,
            home_team: record.home_team,
            away_team: record.away_team,
            match_date: record.match_date,
            status: record.status,
            score: Scoreboard::replay(events),
            event_count: events.len(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Retrieves a match by ID.
///
/// # Errors
///
/// Returns `DomainError::MatchNotFound` if the match does not exist, or a
/// storage error.
pub async fn get_match_by_id(store: &EventStore, match_id: Uuid) -> Result<MatchView, DomainError> {
    let record = store.require_match(match_id).await?;
    let events = store.list(match_id).await?;
    Ok(MatchView::build(record, &events))
}

/// Lists all matches, newest first.
///
/// # Errors
///
/// Returns a storage error if the match table cannot be read.
pub async fn list_matches(store: &EventStore) -> Result<Vec<MatchRecord>, DomainError> {
    store.storage().list_matches().await
}

/// Lists the events of a match in insertion order.
///
/// # Errors
///
/// Returns `DomainError::MatchNotFound` if the match does not exist, or a
/// storage error.
pub async fn list_events(
    store: &EventStore,
    match_id: Uuid,
) -> Result<Vec<MatchEvent>, DomainError> {
    store.list(match_id).await
}
