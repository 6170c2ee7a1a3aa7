//! A live tagging session: recorder, store and match clock wired together.

use std::sync::Arc;

use handtag_core::clock::MatchClock;
use handtag_core::error::DomainError;
use handtag_core::projection::Projection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::event_store::EventStore;
use crate::domain::aggregates::Scoreboard;
use crate::domain::events::{
    Distance, EventCandidate, MatchEvent, PassBucket, Period, Phase, ShotOutcome, TurnoverType,
};
use crate::domain::recorder::{RecorderView, Selection, ShotRecorder};

/// Controller owning the recorder for one match.
///
/// Selections that complete an event are appended before the recorder moves
/// on. If the append fails, the recorder keeps every selection so the same
/// tap can be retried.
pub struct TaggingSession {
    recorder: ShotRecorder,
    scoreboard: Scoreboard,
    store: Arc<EventStore>,
    clock: Arc<dyn MatchClock>,
}

impl std::fmt::Debug for TaggingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggingSession")
            .field("recorder", &self.recorder)
            .field("scoreboard", &self.scoreboard)
            .finish_non_exhaustive()
    }
}

impl TaggingSession {
    /// Opens a session on an existing match, replaying its log for the score.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` or a storage error.
    pub async fn open(
        store: Arc<EventStore>,
        clock: Arc<dyn MatchClock>,
        match_id: Uuid,
        period: Period,
        phase: Phase,
    ) -> Result<Self, DomainError> {
        let events = store.list(match_id).await?;
        Ok(Self {
            recorder: ShotRecorder::new(match_id, period, phase),
            scoreboard: Scoreboard::replay(&events),
            store,
            clock,
        })
    }

    /// The recorder state.
    #[must_use]
    pub fn recorder(&self) -> &ShotRecorder {
        &self.recorder
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> RecorderView {
        self.recorder.view()
    }

    /// Current score.
    #[must_use]
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Switches period.
    pub fn set_period(&mut self, period: Period) {
        self.recorder.set_period(period);
    }

    /// Starts a field shot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME.
    pub fn start_shot(&mut self) -> Result<(), DomainError> {
        self.recorder.start_shot()
    }

    /// Starts a seven-metre throw.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME.
    pub fn start_penalty(&mut self) -> Result<(), DomainError> {
        self.recorder.start_penalty()
    }

    /// Picks the outcome; a field MISS is appended at once.
    ///
    /// # Errors
    ///
    /// Returns the recorder's validation error or the store's error.
    pub async fn select_outcome(
        &mut self,
        outcome: ShotOutcome,
    ) -> Result<Option<MatchEvent>, DomainError> {
        let selection = self.recorder.select_outcome(outcome, self.clock.as_ref())?;
        self.settle(selection).await
    }

    /// Picks the distance.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside DISTANCE.
    pub fn select_distance(&mut self, distance: Distance) -> Result<(), DomainError> {
        self.recorder.select_distance(distance)
    }

    /// Picks the width zone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside ZONE or for a bad zone.
    pub fn select_zone(&mut self, zone: u8) -> Result<(), DomainError> {
        self.recorder.select_zone(zone)
    }

    /// Picks the goal cell; a SAVE is appended at once.
    ///
    /// # Errors
    ///
    /// Returns the recorder's validation error or the store's error.
    pub async fn select_placement(
        &mut self,
        goal_cell: u8,
    ) -> Result<Option<MatchEvent>, DomainError> {
        let selection = self
            .recorder
            .select_placement(goal_cell, self.clock.as_ref())?;
        self.settle(selection).await
    }

    /// Picks the pass bucket and appends the goal.
    ///
    /// # Errors
    ///
    /// Returns the recorder's validation error or the store's error.
    pub async fn select_pass_bucket(
        &mut self,
        bucket: PassBucket,
    ) -> Result<Option<MatchEvent>, DomainError> {
        let selection = self
            .recorder
            .select_pass_bucket(bucket, self.clock.as_ref())?;
        self.settle(selection).await
    }

    /// Explicit commit (penalties).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an incomplete candidate, with
    /// nothing appended and the step unchanged, or the store's error.
    pub async fn commit(&mut self) -> Result<MatchEvent, DomainError> {
        let candidate = self
            .recorder
            .commit(self.clock.as_ref())
            .inspect_err(|e| warn!(error = %e, "commit rejected"))?;
        self.persist(candidate).await
    }

    /// Tags a turnover in one step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME, or the store's error.
    pub async fn record_turnover(
        &mut self,
        turnover_type: TurnoverType,
    ) -> Result<MatchEvent, DomainError> {
        let candidate = self
            .recorder
            .record_turnover(turnover_type, self.clock.as_ref())?;
        self.persist(candidate).await
    }

    /// Tags a free throw in one step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME, or the store's error.
    pub async fn record_free_throw(&mut self) -> Result<MatchEvent, DomainError> {
        let candidate = self.recorder.record_free_throw(self.clock.as_ref())?;
        self.persist(candidate).await
    }

    /// Goes back one step.
    pub fn back(&mut self) {
        self.recorder.back();
    }

    /// Drops the in-progress candidate.
    pub fn cancel(&mut self) {
        self.recorder.cancel();
    }

    /// Removes the last event and reverts its score and possession effects.
    ///
    /// # Errors
    ///
    /// Returns the store's error; nothing is reverted in that case.
    pub async fn undo(&mut self) -> Result<Option<MatchEvent>, DomainError> {
        let removed = self.store.undo_last(self.recorder.match_id()).await?;
        if let Some(event) = &removed {
            self.scoreboard.revert(event);
            self.recorder.undone(event);
        }
        Ok(removed)
    }

    async fn settle(&mut self, selection: Selection) -> Result<Option<MatchEvent>, DomainError> {
        match selection {
            Selection::Advanced => Ok(None),
            Selection::Ready(candidate) => self.persist(candidate).await.map(Some),
        }
    }

    async fn persist(&mut self, candidate: EventCandidate) -> Result<MatchEvent, DomainError> {
        let event = self.store.append(candidate).await?;
        self.recorder.committed(&event);
        self.scoreboard.apply(&event);
        info!(
            event_id = %event.id,
            home = self.scoreboard.home,
            away = self.scoreboard.away,
            "tagged"
        );
        Ok(event)
    }
}
