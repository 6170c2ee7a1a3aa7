//! Commands for the Tagging context.

use chrono::NaiveDate;
use handtag_core::command::Command;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Command to start tagging a new match.
#[derive(Debug, Clone)]
pub struct StartMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Date the match is played.
    pub match_date: NaiveDate,
}

impl Command for StartMatch {
    fn command_type(&self) -> &'static str {
        "tagging.start_match"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to mark a match as done.
#[derive(Debug, Clone)]
pub struct FinishMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The match identifier.
    pub match_id: Uuid,
}

impl Command for FinishMatch {
    fn command_type(&self) -> &'static str {
        "tagging.finish_match"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a match and all of its events.
#[derive(Debug, Clone)]
pub struct DeleteMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The match identifier.
    pub match_id: Uuid,
}

impl Command for DeleteMatch {
    fn command_type(&self) -> &'static str {
        "tagging.delete_match"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// How imported events combine with an existing log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportMode {
    /// Append after the existing events.
    #[default]
    Merge,
    /// Drop the existing events first.
    Replace,
}

/// Command to import events from an external backup.
#[derive(Debug, Clone)]
pub struct ImportEvents {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target match.
    pub match_id: Uuid,
    /// Raw serialized events, possibly in a legacy shape.
    pub events: Vec<serde_json::Value>,
    /// Merge or replace.
    pub mode: ImportMode,
}

impl Command for ImportEvents {
    fn command_type(&self) -> &'static str {
        "tagging.import_events"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
