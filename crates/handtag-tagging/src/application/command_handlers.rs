//! Command handlers for the Tagging context.
//!
//! This module contains application-level command handler functions for the
//! match lifecycle and bulk import: validate the command, mutate through the
//! store or repository, and report what changed.

use handtag_core::clock::Clock;
use handtag_core::command::Command;
use handtag_core::error::DomainError;
use handtag_core::repository::{MatchRecord, MatchRepository, MatchStatus};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::application::backup;
use crate::application::event_store::EventStore;
use crate::domain::commands::{DeleteMatch, FinishMatch, ImportEvents, ImportMode, StartMatch};

/// Outcome of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Events written.
    pub imported: usize,
    /// Events dropped first (replace mode).
    pub replaced: usize,
}

fn team_name(raw: &str, field: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(name.to_owned())
}

/// Handles the `StartMatch` command: creates an in-progress match record.
///
/// # Errors
///
/// Returns `DomainError::Validation` for blank team names, or a storage
/// error.
pub async fn handle_start_match<R: MatchRepository + ?Sized>(
    command: &StartMatch,
    clock: &dyn Clock,
    repo: &R,
) -> Result<MatchRecord, DomainError> {
    let now = clock.now();
    let record = MatchRecord {
        match_id: Uuid::new_v4(),
        home_team: team_name(&command.home_team, "home_team")?,
        away_team: team_name(&command.away_team, "away_team")?,
        match_date: command.match_date,
        status: MatchStatus::InProgress,
        created_at: now,
        updated_at: now,
    };
    repo.insert_match(&record).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        match_id = %record.match_id,
        "match started"
    );
    Ok(record)
}

/// Handles the `FinishMatch` command: marks the match `DONE`. Finishing an
/// already finished match is a no-op.
///
/// # Errors
///
/// Returns `DomainError::MatchNotFound`, or a storage error.
pub async fn handle_finish_match<R: MatchRepository + ?Sized>(
    command: &FinishMatch,
    clock: &dyn Clock,
    repo: &R,
) -> Result<MatchRecord, DomainError> {
    let mut record = repo
        .load_match(command.match_id)
        .await?
        .ok_or(DomainError::MatchNotFound(command.match_id))?;
    if record.status == MatchStatus::Done {
        return Ok(record);
    }
    record.status = MatchStatus::Done;
    record.updated_at = clock.now();
    repo.update_match(&record).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        match_id = %record.match_id,
        "match finished"
    );
    Ok(record)
}

/// Handles the `DeleteMatch` command: removes the match and its whole log.
///
/// # Errors
///
/// Returns `DomainError::MatchNotFound`, or a storage error.
pub async fn handle_delete_match(
    command: &DeleteMatch,
    store: &EventStore,
) -> Result<(), DomainError> {
    store.delete_match(command.match_id).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        match_id = %command.match_id,
        "match deleted"
    );
    Ok(())
}

/// Handles the `ImportEvents` command: normalizes legacy shapes, validates
/// every candidate, and writes the batch in one go.
///
/// # Errors
///
/// Returns `DomainError::Validation` if any event is malformed (nothing is
/// written), `DomainError::MatchNotFound`, or a storage error.
pub async fn handle_import_events(
    command: &ImportEvents,
    store: &EventStore,
) -> Result<ImportReport, DomainError> {
    let candidates = backup::parse_candidates(command.match_id, &command.events)?;
    let batch = store
        .append_batch(
            command.match_id,
            &candidates,
            command.mode == ImportMode::Replace,
        )
        .await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        match_id = %command.match_id,
        imported = batch.events.len(),
        replaced = batch.replaced,
        "events imported"
    );
    Ok(ImportReport {
        imported: batch.events.len(),
        replaced: batch.replaced,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use handtag_core::error::DomainError;
    use handtag_core::repository::{MatchRepository, MatchStatus};
    use handtag_test_support::{
        FailingRepository, FixedClock, InMemoryRepository, fixed_now, match_record,
    };
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn start(home: &str, away: &str) -> StartMatch {
        StartMatch {
            correlation_id: Uuid::new_v4(),
            home_team: home.to_owned(),
            away_team: away.to_owned(),
            match_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_handle_start_match_persists_in_progress_record() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let repo = InMemoryRepository::new();

        // Act
        let record = handle_start_match(&start(" Kiel ", "Flensburg"), &clock, &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(record.home_team, "Kiel");
        assert_eq!(record.status, MatchStatus::InProgress);
        assert_eq!(record.created_at, fixed_now());
        let loaded = repo.load_match(record.match_id).await.unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_handle_start_match_rejects_blank_team() {
        let clock = FixedClock(fixed_now());
        let repo = InMemoryRepository::new();

        let result = handle_start_match(&start("  ", "Flensburg"), &clock, &repo).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_start_match_surfaces_storage_error() {
        let clock = FixedClock(fixed_now());

        let result =
            handle_start_match(&start("Kiel", "Flensburg"), &clock, &FailingRepository).await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[tokio::test]
    async fn test_handle_finish_match_marks_done() {
        let match_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_match(match_record(match_id));
        let clock = FixedClock(fixed_now());
        let command = FinishMatch {
            correlation_id: Uuid::new_v4(),
            match_id,
        };

        let record = handle_finish_match(&command, &clock, &repo).await.unwrap();

        assert_eq!(record.status, MatchStatus::Done);
        let loaded = repo.load_match(match_id).await.unwrap().unwrap();
        assert_eq!(loaded.status, MatchStatus::Done);
    }

    #[tokio::test]
    async fn test_handle_finish_match_returns_error_when_match_not_found() {
        let repo = InMemoryRepository::new();
        let clock = FixedClock(fixed_now());
        let match_id = Uuid::new_v4();
        let command = FinishMatch {
            correlation_id: Uuid::new_v4(),
            match_id,
        };

        match handle_finish_match(&command, &clock, &repo).await.unwrap_err() {
            DomainError::MatchNotFound(id) => assert_eq!(id, match_id),
            other => panic!("expected MatchNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_import_events_replace_reports_dropped_events() {
        // Arrange
        let match_id = Uuid::new_v4();
        let repo = Arc::new(InMemoryRepository::with_match(match_record(match_id)));
        let store = EventStore::new(repo.clone(), Arc::new(FixedClock(fixed_now())));
        let free_throw = json!({
            "timestamp": 10, "period": 1, "phase": "ATTACK", "kind": "FREE_THROW"
        });
        let seed = ImportEvents {
            correlation_id: Uuid::new_v4(),
            match_id,
            events: vec![free_throw.clone(), free_throw.clone()],
            mode: ImportMode::Merge,
        };
        handle_import_events(&seed, &store).await.unwrap();

        // Act
        let command = ImportEvents {
            events: vec![free_throw],
            mode: ImportMode::Replace,
            ..seed
        };
        let report = handle_import_events(&command, &store).await.unwrap();

        // Assert
        assert_eq!(report, ImportReport { imported: 1, replaced: 2 });
        assert_eq!(repo.event_count(), 1);
    }

    #[tokio::test]
    async fn test_handle_delete_match_removes_match() {
        let match_id = Uuid::new_v4();
        let repo = Arc::new(InMemoryRepository::with_match(match_record(match_id)));
        let store = EventStore::new(repo.clone(), Arc::new(FixedClock(fixed_now())));
        let command = DeleteMatch {
            correlation_id: Uuid::new_v4(),
            match_id,
        };

        handle_delete_match(&command, &store).await.unwrap();

        assert_eq!(repo.load_match(match_id).await.unwrap(), None);
        assert!(handle_delete_match(&command, &store).await.unwrap_err().is_not_found());
    }
}
