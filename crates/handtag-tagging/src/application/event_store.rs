//! The append-only, per-match event log.
//!
//! Every mutation for a given match runs under that match's queue, so an
//! append and an undo can never interleave. Reads go straight to storage,
//! whose writes are atomic, and therefore see either the old or the new log.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use handtag_core::clock::Clock;
use handtag_core::error::DomainError;
use handtag_core::event::TaggedEvent;
use handtag_core::repository::{MatchRecord, Storage, StoredEvent};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::events::{EventCandidate, EventDetail, GoalCell, MatchEvent, Shot, ShotOutcome};

/// Corrections allowed on an existing event. Identity, owner and kind are
/// never patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventPatch {
    /// New value of the review flag.
    pub important: Option<bool>,
    /// Corrected shot outcome.
    pub outcome: Option<ShotOutcome>,
    /// Corrected goal cell.
    pub goal_cell: Option<u8>,
}

impl EventPatch {
    /// Applies the patch to a copy of `event` and re-validates it.
    ///
    /// Moving a shot away from GOAL drops its pass count, which only goals
    /// carry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when shot fields are patched on a
    /// non-shot or the result breaks an event invariant.
    pub fn apply(&self, event: &MatchEvent) -> Result<MatchEvent, DomainError> {
        let mut patched = event.clone();
        if let Some(important) = self.important {
            patched.important = important;
        }
        if self.outcome.is_none() && self.goal_cell.is_none() {
            return Ok(patched);
        }

        let EventDetail::Shot(shot) = &mut patched.detail else {
            return Err(DomainError::Validation(format!(
                "outcome and goal cell can only be corrected on SHOT events, not {}",
                event.kind().as_str()
            )));
        };
        let new_cell = self.goal_cell.map(GoalCell::try_from).transpose()?;
        match shot {
            Shot::Field {
                outcome,
                goal_cell,
                passes,
                ..
            } => {
                if let Some(o) = self.outcome {
                    *outcome = o;
                    if o != ShotOutcome::Goal {
                        *passes = None;
                    }
                }
                if new_cell.is_some() {
                    *goal_cell = new_cell;
                }
            }
            Shot::Penalty { outcome, goal_cell } => {
                if let Some(o) = self.outcome {
                    *outcome = o;
                }
                if new_cell.is_some() {
                    *goal_cell = new_cell;
                }
            }
        }
        patched.validate()?;
        Ok(patched)
    }
}

fn to_stored_event(event: &MatchEvent, sequence_number: i64, clock: &dyn Clock) -> StoredEvent {
    StoredEvent {
        event_id: event.event_id(),
        match_id: event.match_id(),
        event_type: event.event_type().to_owned(),
        payload: event.to_payload(),
        sequence_number,
        recorded_at: clock.now(),
    }
}

/// Rebuilds a typed event from its stored form.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the payload no longer deserializes.
pub(crate) fn from_stored_event(stored: &StoredEvent) -> Result<MatchEvent, DomainError> {
    serde_json::from_value(stored.payload.clone()).map_err(|e| {
        DomainError::Storage(format!(
            "event {} deserialization failed: {e}",
            stored.event_id
        ))
    })
}

/// Result of a batch append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAppend {
    /// The events written, in log order.
    pub events: Vec<MatchEvent>,
    /// How many existing events the batch dropped (replace mode only).
    pub replaced: usize,
}

/// Rejects an event that would sort before the current tail of its log.
fn ensure_in_order(event: &MatchEvent, last: &MatchEvent) -> Result<(), DomainError> {
    if (event.period, event.timestamp_ms) < (last.period, last.timestamp_ms) {
        return Err(DomainError::Validation(format!(
            "event at period {} {} ms is earlier than the last logged event at period {} {} ms",
            u8::from(event.period),
            event.timestamp_ms,
            u8::from(last.period),
            last.timestamp_ms
        )));
    }
    Ok(())
}

/// The Event Store: single source of truth for what happened in a match.
pub struct EventStore {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    queues: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore").finish_non_exhaustive()
    }
}

impl EventStore {
    /// Creates a store over `storage`, stamping writes with `clock`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// The backing storage.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// The wall clock used for record timestamps.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn queue(&self, match_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(queues.entry(match_id).or_default())
    }

    /// Loads a match or fails with `MatchNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` or a storage error.
    pub async fn require_match(&self, match_id: Uuid) -> Result<MatchRecord, DomainError> {
        self.storage
            .load_match(match_id)
            .await?
            .ok_or(DomainError::MatchNotFound(match_id))
    }

    fn forget_queue(&self, match_id: Uuid) {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&match_id);
    }

    /// Appends a validated event at the end of its match log, assigning an
    /// identifier if the candidate has none.
    ///
    /// The event must not sort before the current last event by period and
    /// then timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a malformed, out-of-order or
    /// duplicate-id candidate, `DomainError::MatchNotFound` for an unknown
    /// match, and `DomainError::Storage` if the write fails (nothing is
    /// written).
    #[instrument(skip(self, candidate), fields(match_id = ?candidate.match_id))]
    pub async fn append(&self, candidate: EventCandidate) -> Result<MatchEvent, DomainError> {
        let supplied_id = candidate.id.is_some();
        let event = candidate.into_event().inspect_err(|e| {
            warn!(error = %e, "rejected event candidate");
        })?;
        self.require_match(event.match_id).await?;

        let queue = self.queue(event.match_id);
        let _guard = queue.lock().await;

        if supplied_id && self.storage.load_event(event.id).await?.is_some() {
            warn!(event_id = %event.id, "rejected duplicate event id");
            return Err(DomainError::Validation(format!(
                "event {} already exists",
                event.id
            )));
        }
        let existing = self.storage.load_events(event.match_id).await?;
        if let Some(last) = existing.last() {
            ensure_in_order(&event, &from_stored_event(last)?)
                .inspect_err(|e| warn!(error = %e, "rejected out-of-order event"))?;
        }

        let sequence_number = existing.last().map_or(0, |e| e.sequence_number) + 1;
        let stored = to_stored_event(&event, sequence_number, self.clock.as_ref());
        self.storage
            .insert_events(std::slice::from_ref(&stored))
            .await
            .inspect_err(|e| warn!(error = %e, "event append failed"))?;

        info!(
            event_id = %event.id,
            kind = event.kind().as_str(),
            sequence_number,
            "event appended"
        );
        Ok(event)
    }

    /// Validates every candidate, then appends them all in one atomic write.
    /// With `replace`, the existing log is dropped in the same write and the
    /// number of dropped events is reported.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any candidate is malformed (and
    /// nothing is written), `DomainError::MatchNotFound`, or a storage error.
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub async fn append_batch(
        &self,
        match_id: Uuid,
        candidates: &[EventCandidate],
        replace: bool,
    ) -> Result<BatchAppend, DomainError> {
        let events = candidates
            .iter()
            .map(EventCandidate::into_event)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(foreign) = events.iter().find(|e| e.match_id != match_id) {
            return Err(DomainError::Validation(format!(
                "event {} belongs to match {}, not {match_id}",
                foreign.id, foreign.match_id
            )));
        }
        self.require_match(match_id).await?;

        let queue = self.queue(match_id);
        let _guard = queue.lock().await;

        let existing = self.storage.load_events(match_id).await?;
        let (first, replaced) = if replace {
            (1, existing.len())
        } else {
            (existing.last().map_or(0, |e| e.sequence_number) + 1, 0)
        };
        let stored: Vec<StoredEvent> = events
            .iter()
            .zip(first..)
            .map(|(event, seq)| to_stored_event(event, seq, self.clock.as_ref()))
            .collect();

        if replace {
            self.storage.replace_events(match_id, &stored).await?;
        } else {
            self.storage.insert_events(&stored).await?;
        }

        info!(%match_id, count = events.len(), replaced, "event batch appended");
        Ok(BatchAppend { events, replaced })
    }

    /// Removes the most recently appended event of a match.
    ///
    /// Returns the removed event so the caller can revert its effects, or
    /// `None` when the log is empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` for an unknown match, or a
    /// storage error (the log is left untouched).
    #[instrument(skip(self))]
    pub async fn undo_last(&self, match_id: Uuid) -> Result<Option<MatchEvent>, DomainError> {
        self.require_match(match_id).await?;

        let queue = self.queue(match_id);
        let _guard = queue.lock().await;

        let events = self.storage.load_events(match_id).await?;
        let Some(last) = events.last() else {
            info!("nothing to undo");
            return Ok(None);
        };
        let event = from_stored_event(last)?;
        self.storage.delete_event(last.event_id).await?;

        info!(event_id = %event.id, kind = event.kind().as_str(), "event undone");
        Ok(Some(event))
    }

    /// Returns all events for a match in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` for an unknown match, or a
    /// storage error.
    pub async fn list(&self, match_id: Uuid) -> Result<Vec<MatchEvent>, DomainError> {
        self.require_match(match_id).await?;
        self.storage
            .load_events(match_id)
            .await?
            .iter()
            .map(from_stored_event)
            .collect()
    }

    /// Applies a correction to a single event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventNotFound`, `DomainError::Validation` for a
    /// patch that would break an invariant, or a storage error.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        event_id: Uuid,
        patch: &EventPatch,
    ) -> Result<MatchEvent, DomainError> {
        let (_guard, current) = self.lock_event(event_id).await?;
        let patched = patch.apply(&current)?;
        self.storage
            .update_event(event_id, &patched.to_payload())
            .await?;

        info!(%event_id, "event updated");
        Ok(patched)
    }

    /// Removes one specific event, independent of undo ordering.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventNotFound`, or a storage error.
    #[instrument(skip(self))]
    pub async fn delete(&self, event_id: Uuid) -> Result<MatchEvent, DomainError> {
        let (_guard, current) = self.lock_event(event_id).await?;
        self.storage.delete_event(event_id).await?;

        info!(%event_id, "event deleted");
        Ok(current)
    }

    /// Deletes a match and its whole log.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound`, or a storage error.
    #[instrument(skip(self))]
    pub async fn delete_match(&self, match_id: Uuid) -> Result<(), DomainError> {
        self.require_match(match_id).await?;

        let queue = self.queue(match_id);
        let deleted = {
            let _guard = queue.lock().await;
            self.storage.delete_match(match_id).await
        };
        self.forget_queue(match_id);
        deleted?;

        info!("match deleted");
        Ok(())
    }

    /// Finds an event, takes its match queue, and re-reads it under the lock.
    async fn lock_event(
        &self,
        event_id: Uuid,
    ) -> Result<(tokio::sync::OwnedMutexGuard<()>, MatchEvent), DomainError> {
        let stored = self
            .storage
            .load_event(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?;
        let guard = self.queue(stored.match_id).lock_owned().await;
        let stored = self
            .storage
            .load_event(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?;
        Ok((guard, from_stored_event(&stored)?))
    }
}
