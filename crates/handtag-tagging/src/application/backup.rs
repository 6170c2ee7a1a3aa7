//! Backup export and import.
//!
//! A backup is one match record plus its full log in the flat wire form.
//! Import also accepts the older field names (`type`, `subType`,
//! `placement`) and the old standalone `PENALTY` kind.

use handtag_core::error::DomainError;
use handtag_core::repository::MatchRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::event_store::EventStore;
use crate::domain::events::EventCandidate;

/// Current backup layout version.
pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// A full, self-contained copy of one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBackup {
    /// Layout version of this file; currently [`BACKUP_FORMAT_VERSION`].
    pub format_version: u32,
    /// The match header.
    #[serde(rename = "match")]
    pub match_record: MatchRecord,
    /// The full log in insertion order, in wire form.
    pub events: Vec<EventCandidate>,
}

/// Builds a backup of a match and its log in insertion order.
///
/// # Errors
///
/// Returns `DomainError::MatchNotFound`, or a storage error.
#[instrument(skip(store))]
pub async fn export_match(store: &EventStore, match_id: Uuid) -> Result<MatchBackup, DomainError> {
    let match_record = store.require_match(match_id).await?;
    let events: Vec<EventCandidate> = store
        .list(match_id)
        .await?
        .into_iter()
        .map(EventCandidate::from)
        .collect();

    info!(count = events.len(), "match exported");
    Ok(MatchBackup {
        format_version: BACKUP_FORMAT_VERSION,
        match_record,
        events,
    })
}

fn rename(object: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = object.remove(from) {
        object.entry(to).or_insert(value);
    }
}

/// Rewrites the older event shape into the current one. Objects already in
/// the current shape pass through unchanged.
#[must_use]
pub fn normalize_legacy(mut raw: Value) -> Value {
    let Some(object) = raw.as_object_mut() else {
        return raw;
    };
    if let Some(legacy) = object.remove("type") {
        if legacy.as_str() == Some("PENALTY") {
            object.insert("kind".to_owned(), Value::from("SHOT"));
            object.insert("isPenalty".to_owned(), Value::Bool(true));
        } else {
            object.entry("kind").or_insert(legacy);
        }
    }
    rename(object, "subType", "turnoverType");
    rename(object, "placement", "goalCell");
    raw
}

fn at_index(index: usize, error: DomainError) -> DomainError {
    match error {
        DomainError::Validation(message) => {
            DomainError::Validation(format!("event {index}: {message}"))
        }
        other => other,
    }
}

/// Turns raw backup events into validated candidates owned by `match_id`.
///
/// Identifiers from the file are dropped so imported events never collide
/// with events already stored, here or in the source match.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming the first event that fails to
/// parse or validate.
pub fn parse_candidates(match_id: Uuid, raw: &[Value]) -> Result<Vec<EventCandidate>, DomainError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(DomainError::Validation(format!(
                    "event {index}: expected a JSON object"
                )));
            }
            let mut candidate: EventCandidate =
                serde_json::from_value(normalize_legacy(value.clone()))
                    .map_err(|e| DomainError::Validation(format!("event {index}: {e}")))?;
            candidate.id = None;
            candidate.match_id = Some(match_id);
            candidate.into_event().map_err(|e| at_index(index, e))?;
            Ok(candidate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use handtag_core::error::DomainError;
    use handtag_test_support::{FixedClock, InMemoryRepository, fixed_now, match_record};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::application::command_handlers::handle_import_events;
    use crate::domain::commands::{ImportEvents, ImportMode};
    use crate::domain::events::{EventKind, TurnoverType};

    fn store_with_match(match_id: Uuid) -> EventStore {
        let repo = Arc::new(InMemoryRepository::with_match(match_record(match_id)));
        EventStore::new(repo, Arc::new(FixedClock(fixed_now())))
    }

    #[test]
    fn test_normalize_legacy_penalty_becomes_shot() {
        let raw = json!({ "type": "PENALTY", "outcome": "GOAL", "placement": 2 });

        let normalized = normalize_legacy(raw);

        assert_eq!(
            normalized,
            json!({ "kind": "SHOT", "isPenalty": true, "outcome": "GOAL", "goalCell": 2 })
        );
    }

    #[test]
    fn test_normalize_legacy_renames_turnover_fields() {
        let raw = json!({ "type": "TURNOVER", "subType": "STEAL" });

        let normalized = normalize_legacy(raw);

        assert_eq!(normalized, json!({ "kind": "TURNOVER", "turnoverType": "STEAL" }));
    }

    #[test]
    fn test_normalize_legacy_leaves_current_shape_alone() {
        let raw = json!({ "kind": "FREE_THROW", "timestamp": 5 });

        assert_eq!(normalize_legacy(raw.clone()), raw);
    }

    #[test]
    fn test_parse_candidates_forces_owner_and_drops_ids() {
        let match_id = Uuid::new_v4();
        let raw = vec![json!({
            "id": Uuid::new_v4(),
            "matchId": Uuid::new_v4(),
            "timestamp": 1_000,
            "period": 2,
            "phase": "DEFENSE",
            "type": "TURNOVER",
            "subType": "PASSIVE_PLAY"
        })];

        let candidates = parse_candidates(match_id, &raw).unwrap();

        assert_eq!(candidates[0].id, None);
        assert_eq!(candidates[0].match_id, Some(match_id));
        assert_eq!(candidates[0].kind, Some(EventKind::Turnover));
        assert_eq!(candidates[0].turnover_type, Some(TurnoverType::PassivePlay));
    }

    #[test]
    fn test_parse_candidates_names_first_bad_event() {
        let raw = vec![
            json!({ "timestamp": 1, "period": 1, "phase": "ATTACK", "kind": "FREE_THROW" }),
            json!({ "timestamp": 2, "period": 3, "phase": "ATTACK", "kind": "FREE_THROW" }),
        ];

        match parse_candidates(Uuid::new_v4(), &raw).unwrap_err() {
            DomainError::Validation(message) => assert!(message.starts_with("event 1:")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_candidates_rejects_non_object() {
        let result = parse_candidates(Uuid::new_v4(), &[json!(42)]);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_export_then_import_into_new_match_preserves_log() {
        // Arrange
        let source_id = Uuid::new_v4();
        let source = store_with_match(source_id);
        let seed = ImportEvents {
            correlation_id: Uuid::new_v4(),
            match_id: source_id,
            events: vec![
                json!({ "timestamp": 1_000, "period": 1, "phase": "ATTACK", "kind": "SHOT",
                        "outcome": "GOAL", "zone": 2, "distance": "6m", "goalCell": 4,
                        "passes": 4 }),
                json!({ "timestamp": 2_000, "period": 1, "phase": "DEFENSE", "type": "PENALTY",
                        "outcome": "SAVE", "placement": 1 }),
            ],
            mode: ImportMode::Merge,
        };
        handle_import_events(&seed, &source).await.unwrap();

        // Act
        let backup = export_match(&source, source_id).await.unwrap();
        let text = serde_json::to_string(&backup).unwrap();
        let parsed: MatchBackup = serde_json::from_str(&text).unwrap();
        let target_id = Uuid::new_v4();
        let target = store_with_match(target_id);
        let command = ImportEvents {
            correlation_id: Uuid::new_v4(),
            match_id: target_id,
            events: parsed
                .events
                .iter()
                .map(|e| serde_json::to_value(e).unwrap())
                .collect(),
            mode: ImportMode::Replace,
        };
        handle_import_events(&command, &target).await.unwrap();

        // Assert
        assert_eq!(parsed.format_version, BACKUP_FORMAT_VERSION);
        assert_eq!(parsed.match_record.match_id, source_id);
        let copied = target.list(target_id).await.unwrap();
        let original = source.list(source_id).await.unwrap();
        assert_eq!(copied.len(), 2);
        for (copy, orig) in copied.iter().zip(&original) {
            assert_eq!(copy.detail, orig.detail);
            assert_eq!(copy.timestamp_ms, orig.timestamp_ms);
            assert_ne!(copy.id, orig.id);
        }
    }

    #[tokio::test]
    async fn test_export_unknown_match_is_not_found() {
        let store = store_with_match(Uuid::new_v4());

        assert!(export_match(&store, Uuid::new_v4()).await.unwrap_err().is_not_found());
    }
}
