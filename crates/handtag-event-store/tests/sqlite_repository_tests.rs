//! Integration tests for `SqliteRepository`.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use handtag_core::error::DomainError;
use handtag_core::repository::{
    EventRepository, MatchRecord, MatchRepository, MatchStatus, StoredEvent,
};
use handtag_event_store::SqliteRepository;
use uuid::Uuid;

fn make_match(minutes_after: i64) -> MatchRecord {
    let created_at =
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap() + Duration::minutes(minutes_after);
    MatchRecord {
        match_id: Uuid::new_v4(),
        home_team: "HC Aalborg".to_string(),
        away_team: "GOG".to_string(),
        match_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        status: MatchStatus::InProgress,
        created_at,
        updated_at: created_at,
    }
}

/// Helper to build a `StoredEvent` with sensible defaults.
fn make_stored_event(match_id: Uuid, sequence_number: i64) -> StoredEvent {
    StoredEvent {
        event_id: Uuid::new_v4(),
        match_id,
        event_type: "FREE_THROW".to_string(),
        payload: serde_json::json!({ "kind": "FREE_THROW", "timestamp": sequence_number }),
        sequence_number,
        recorded_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    }
}

async fn repo_with_match() -> (SqliteRepository, Uuid) {
    let repo = SqliteRepository::in_memory().await.unwrap();
    let record = make_match(0);
    repo.insert_match(&record).await.unwrap();
    (repo, record.match_id)
}

// --- matches ---

#[tokio::test]
async fn test_insert_and_load_match_round_trip() {
    let repo = SqliteRepository::in_memory().await.unwrap();
    let record = make_match(0);

    repo.insert_match(&record).await.unwrap();

    let loaded = repo.load_match(record.match_id).await.unwrap();
    assert_eq!(loaded, Some(record));
}

#[tokio::test]
async fn test_load_match_returns_none_for_unknown_id() {
    let repo = SqliteRepository::in_memory().await.unwrap();

    assert_eq!(repo.load_match(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_matches_newest_first() {
    let repo = SqliteRepository::in_memory().await.unwrap();
    let older = make_match(0);
    let newer = make_match(90);
    repo.insert_match(&older).await.unwrap();
    repo.insert_match(&newer).await.unwrap();

    let listed = repo.list_matches().await.unwrap();

    assert_eq!(listed, vec![newer, older]);
}

#[tokio::test]
async fn test_update_match_persists_status() {
    let repo = SqliteRepository::in_memory().await.unwrap();
    let mut record = make_match(0);
    repo.insert_match(&record).await.unwrap();
    record.status = MatchStatus::Done;
    record.updated_at += Duration::hours(1);

    repo.update_match(&record).await.unwrap();

    let loaded = repo.load_match(record.match_id).await.unwrap().unwrap();
    assert_eq!(loaded.status, MatchStatus::Done);
    assert_eq!(loaded.updated_at, record.updated_at);
}

#[tokio::test]
async fn test_update_unknown_match_returns_not_found() {
    let repo = SqliteRepository::in_memory().await.unwrap();
    let record = make_match(0);

    match repo.update_match(&record).await.unwrap_err() {
        DomainError::MatchNotFound(id) => assert_eq!(id, record.match_id),
        other => panic!("expected MatchNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_match_cascades_to_events() {
    let (repo, match_id) = repo_with_match().await;
    repo.insert_events(&[make_stored_event(match_id, 1), make_stored_event(match_id, 2)])
        .await
        .unwrap();

    repo.delete_match(match_id).await.unwrap();

    assert_eq!(repo.load_match(match_id).await.unwrap(), None);
    assert!(repo.load_events(match_id).await.unwrap().is_empty());
    assert!(repo.delete_match(match_id).await.unwrap_err().is_not_found());
}

// --- events ---

#[tokio::test]
async fn test_load_events_returns_empty_vec_for_match_without_events() {
    let (repo, match_id) = repo_with_match().await;

    let events = repo.load_events(match_id).await.unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn test_insert_and_load_events_in_sequence_order() {
    let (repo, match_id) = repo_with_match().await;
    let second = make_stored_event(match_id, 2);
    let first = make_stored_event(match_id, 1);

    repo.insert_events(&[second.clone(), first.clone()]).await.unwrap();

    let loaded = repo.load_events(match_id).await.unwrap();
    assert_eq!(loaded, vec![first, second]);
}

#[tokio::test]
async fn test_insert_events_is_atomic_on_conflict() {
    let (repo, match_id) = repo_with_match().await;
    repo.insert_events(&[make_stored_event(match_id, 1)]).await.unwrap();

    let result = repo
        .insert_events(&[make_stored_event(match_id, 2), make_stored_event(match_id, 1)])
        .await;

    assert!(matches!(result, Err(DomainError::Storage(_))));
    assert_eq!(repo.load_events(match_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_insert_event_for_unknown_match_fails() {
    let repo = SqliteRepository::in_memory().await.unwrap();

    let result = repo.insert_events(&[make_stored_event(Uuid::new_v4(), 1)]).await;

    assert!(matches!(result, Err(DomainError::Storage(_))));
}

#[tokio::test]
async fn test_load_event_by_id() {
    let (repo, match_id) = repo_with_match().await;
    let event = make_stored_event(match_id, 1);
    repo.insert_events(std::slice::from_ref(&event)).await.unwrap();

    assert_eq!(repo.load_event(event.event_id).await.unwrap(), Some(event));
    assert_eq!(repo.load_event(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn test_update_event_replaces_payload_only() {
    let (repo, match_id) = repo_with_match().await;
    let event = make_stored_event(match_id, 1);
    repo.insert_events(std::slice::from_ref(&event)).await.unwrap();
    let payload = serde_json::json!({ "kind": "FREE_THROW", "important": true });

    repo.update_event(event.event_id, &payload).await.unwrap();

    let loaded = repo.load_event(event.event_id).await.unwrap().unwrap();
    assert_eq!(loaded.payload, payload);
    assert_eq!(loaded.sequence_number, 1);
}

#[tokio::test]
async fn test_update_and_delete_unknown_event_return_not_found() {
    let (repo, _match_id) = repo_with_match().await;
    let id = Uuid::new_v4();

    match repo.update_event(id, &serde_json::json!({})).await.unwrap_err() {
        DomainError::EventNotFound(found) => assert_eq!(found, id),
        other => panic!("expected EventNotFound, got {other:?}"),
    }
    assert!(repo.delete_event(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_event_removes_only_that_event() {
    let (repo, match_id) = repo_with_match().await;
    let first = make_stored_event(match_id, 1);
    let second = make_stored_event(match_id, 2);
    repo.insert_events(&[first.clone(), second.clone()]).await.unwrap();

    repo.delete_event(first.event_id).await.unwrap();

    assert_eq!(repo.load_events(match_id).await.unwrap(), vec![second]);
}

#[tokio::test]
async fn test_replace_events_swaps_whole_log() {
    let (repo, match_id) = repo_with_match().await;
    repo.insert_events(&[make_stored_event(match_id, 1), make_stored_event(match_id, 2)])
        .await
        .unwrap();
    let replacement = make_stored_event(match_id, 1);

    repo.replace_events(match_id, std::slice::from_ref(&replacement))
        .await
        .unwrap();

    assert_eq!(repo.load_events(match_id).await.unwrap(), vec![replacement]);
}

#[tokio::test]
async fn test_replace_events_leaves_other_matches_alone() {
    let (repo, match_id) = repo_with_match().await;
    let other = make_match(5);
    repo.insert_match(&other).await.unwrap();
    let kept = make_stored_event(other.match_id, 1);
    repo.insert_events(std::slice::from_ref(&kept)).await.unwrap();

    repo.replace_events(match_id, &[]).await.unwrap();

    assert_eq!(repo.load_events(other.match_id).await.unwrap(), vec![kept]);
}
