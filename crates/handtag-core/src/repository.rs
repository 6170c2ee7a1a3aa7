//! Persistence boundary: repositories for match records and their event logs.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a tagged event.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Match this event belongs to.
    pub match_id: Uuid,
    /// Event kind name for deserialization routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Position within the match log, starting at 1.
    pub sequence_number: i64,
    /// Wall-clock time the event was persisted.
    pub recorded_at: DateTime<Utc>,
}

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Tagging is ongoing.
    InProgress,
    /// Tagging has finished.
    Done,
}

impl MatchStatus {
    /// Returns the canonical storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            other => Err(DomainError::Validation(format!(
                "unknown match status: {other}"
            ))),
        }
    }
}

/// Stored representation of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique match identifier.
    pub match_id: Uuid,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Calendar date the match was played.
    pub match_date: NaiveDate,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository for the per-match event logs.
///
/// Implementations must make every write atomic: a failed call leaves no
/// partial state visible to `load_events`.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Load all events for a match, ordered by sequence number.
    async fn load_events(&self, match_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Load a single event by its identifier.
    async fn load_event(&self, event_id: Uuid) -> Result<Option<StoredEvent>, DomainError>;

    /// Insert a batch of events in one atomic write.
    async fn insert_events(&self, events: &[StoredEvent]) -> Result<(), DomainError>;

    /// Replace the payload of an existing event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventNotFound` if no event has the given ID.
    async fn update_event(
        &self,
        event_id: Uuid,
        payload: &serde_json::Value,
    ) -> Result<(), DomainError>;

    /// Delete a single event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventNotFound` if no event has the given ID.
    async fn delete_event(&self, event_id: Uuid) -> Result<(), DomainError>;

    /// Atomically swap a match's whole log for `events`.
    async fn replace_events(
        &self,
        match_id: Uuid,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}

/// Repository for match records.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a new match.
    async fn insert_match(&self, record: &MatchRecord) -> Result<(), DomainError>;

    /// Load a match by its identifier.
    async fn load_match(&self, match_id: Uuid) -> Result<Option<MatchRecord>, DomainError>;

    /// List all matches, newest first.
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, DomainError>;

    /// Overwrite an existing match record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` if the match does not exist.
    async fn update_match(&self, record: &MatchRecord) -> Result<(), DomainError>;

    /// Delete a match together with its whole event log.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` if the match does not exist.
    async fn delete_match(&self, match_id: Uuid) -> Result<(), DomainError>;
}

/// A single backend serving both repositories.
pub trait Storage: EventRepository + MatchRepository {}

impl<T: EventRepository + MatchRepository> Storage for T {}
