//! Test repositories: in-memory and failing implementations of the
//! persistence boundary.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use handtag_core::error::DomainError;
use handtag_core::repository::{EventRepository, MatchRecord, MatchRepository, StoredEvent};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    matches: Vec<MatchRecord>,
    events: Vec<StoredEvent>,
}

/// A repository that keeps everything in memory. Every call takes one lock,
/// so each write is atomic. Writes can be switched to fail on demand to
/// exercise storage-error paths.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
    fail_writes: AtomicBool,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository already holding `record`.
    #[must_use]
    pub fn with_match(record: MatchRecord) -> Self {
        let repo = Self::default();
        repo.state.lock().unwrap().matches.push(record);
        repo
    }

    /// Makes every subsequent write fail with `DomainError::Storage`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Total number of stored events across all matches.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn event_count(&self) -> usize {
        self.state.lock().unwrap().events.len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("disk full".into()));
        }
        Ok(())
    }
}

fn check_unique(existing: &[StoredEvent], incoming: &[StoredEvent]) -> Result<(), DomainError> {
    for (i, event) in incoming.iter().enumerate() {
        let clash = existing.iter().any(|e| e.event_id == event.event_id)
            || incoming[..i].iter().any(|e| e.event_id == event.event_id);
        if clash {
            return Err(DomainError::Storage(format!(
                "duplicate event id {}",
                event.event_id
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn load_events(&self, match_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut events: Vec<StoredEvent> = state
            .events
            .iter()
            .filter(|e| e.match_id == match_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.sequence_number);
        Ok(events)
    }

    async fn load_event(&self, event_id: Uuid) -> Result<Option<StoredEvent>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.events.iter().find(|e| e.event_id == event_id).cloned())
    }

    async fn insert_events(&self, events: &[StoredEvent]) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        check_unique(&state.events, events)?;
        state.events.extend_from_slice(events);
        Ok(())
    }

    async fn update_event(
        &self,
        event_id: Uuid,
        payload: &serde_json::Value,
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let event = state
            .events
            .iter_mut()
            .find(|e| e.event_id == event_id)
            .ok_or(DomainError::EventNotFound(event_id))?;
        event.payload = payload.clone();
        Ok(())
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let before = state.events.len();
        state.events.retain(|e| e.event_id != event_id);
        if state.events.len() == before {
            return Err(DomainError::EventNotFound(event_id));
        }
        Ok(())
    }

    async fn replace_events(
        &self,
        match_id: Uuid,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let others: Vec<StoredEvent> = state
            .events
            .iter()
            .filter(|e| e.match_id != match_id)
            .cloned()
            .collect();
        check_unique(&others, events)?;
        state.events = others;
        state.events.extend_from_slice(events);
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for InMemoryRepository {
    async fn insert_match(&self, record: &MatchRecord) -> Result<(), DomainError> {
        self.check_writable()?;
        self.state.lock().unwrap().matches.push(record.clone());
        Ok(())
    }

    async fn load_match(&self, match_id: Uuid) -> Result<Option<MatchRecord>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.matches.iter().find(|m| m.match_id == match_id).cloned())
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, DomainError> {
        let mut matches = self.state.lock().unwrap().matches.clone();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn update_match(&self, record: &MatchRecord) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let existing = state
            .matches
            .iter_mut()
            .find(|m| m.match_id == record.match_id)
            .ok_or(DomainError::MatchNotFound(record.match_id))?;
        *existing = record.clone();
        Ok(())
    }

    async fn delete_match(&self, match_id: Uuid) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let before = state.matches.len();
        state.matches.retain(|m| m.match_id != match_id);
        if state.matches.len() == before {
            return Err(DomainError::MatchNotFound(match_id));
        }
        state.events.retain(|e| e.match_id != match_id);
        Ok(())
    }
}

/// A repository that always returns a storage error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingRepository;

fn connection_refused() -> DomainError {
    DomainError::Storage("connection refused".into())
}

#[async_trait]
impl EventRepository for FailingRepository {
    async fn load_events(&self, _match_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(connection_refused())
    }

    async fn load_event(&self, _event_id: Uuid) -> Result<Option<StoredEvent>, DomainError> {
        Err(connection_refused())
    }

    async fn insert_events(&self, _events: &[StoredEvent]) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn update_event(
        &self,
        _event_id: Uuid,
        _payload: &serde_json::Value,
    ) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn delete_event(&self, _event_id: Uuid) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn replace_events(
        &self,
        _match_id: Uuid,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(connection_refused())
    }
}

#[async_trait]
impl MatchRepository for FailingRepository {
    async fn insert_match(&self, _record: &MatchRecord) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn load_match(&self, _match_id: Uuid) -> Result<Option<MatchRecord>, DomainError> {
        Err(connection_refused())
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, DomainError> {
        Err(connection_refused())
    }

    async fn update_match(&self, _record: &MatchRecord) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn delete_match(&self, _match_id: Uuid) -> Result<(), DomainError> {
        Err(connection_refused())
    }
}
