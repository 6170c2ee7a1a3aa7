//! Shot recorder: the multi-tap input flow that turns selections into one
//! well-formed event candidate.
//!
//! ```text
//! HOME ─ start shot ─> SHOT_PICK ─ GOAL/SAVE ─> DISTANCE ─> ZONE ─> PLACEMENT
//!                          │                                   ├─ SAVE: ready
//!                          │                                   └─ GOAL ─> PASS_BUCKET ─> ready
//!                          └─ MISS: ready
//! HOME ─ start penalty ─> PENALTY ─ commit ─> ready
//! ```
//!
//! The recorder never touches storage. When a selection completes an event it
//! returns [`Selection::Ready`] with the candidate and stays where it is; the
//! caller persists the candidate and then calls [`ShotRecorder::committed`].
//! A failed append therefore leaves every selection in place for a retry.

use handtag_core::clock::MatchClock;
use handtag_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{
    Distance, EventCandidate, EventKind, GoalCell, MatchEvent, PassBucket, Period, Phase,
    ShotOutcome, TurnoverType, WidthZone,
};

/// Current step of the input flow, with everything selected so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "step",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum RecorderStep {
    /// Idle.
    Home,
    /// Waiting for the shot outcome.
    ShotPick,
    /// Waiting for the distance.
    Distance {
        /// Outcome picked on the previous tap.
        outcome: ShotOutcome,
    },
    /// Waiting for the width zone.
    Zone {
        /// Picked outcome.
        outcome: ShotOutcome,
        /// Picked distance.
        distance: Distance,
    },
    /// Waiting for the goal cell.
    Placement {
        /// Picked outcome, GOAL or SAVE.
        outcome: ShotOutcome,
        /// Picked distance.
        distance: Distance,
        /// Picked width zone.
        zone: WidthZone,
    },
    /// Goal tagged; waiting for the pass bucket before anything is saved.
    PassBucket {
        /// Picked distance.
        distance: Distance,
        /// Picked width zone.
        zone: WidthZone,
        /// Cell the ball went in.
        goal_cell: GoalCell,
    },
    /// Seven-metre throw; outcome and placement in any order, then commit.
    Penalty {
        /// Outcome, once picked.
        outcome: Option<ShotOutcome>,
        /// Goal cell, once picked.
        goal_cell: Option<GoalCell>,
    },
}

impl RecorderStep {
    fn name(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::ShotPick => "SHOT_PICK",
            Self::Distance { .. } => "DISTANCE",
            Self::Zone { .. } => "ZONE",
            Self::Placement { .. } => "PLACEMENT",
            Self::PassBucket { .. } => "PASS_BUCKET",
            Self::Penalty { .. } => "PENALTY",
        }
    }

    /// The step this one was reached from, with the data collected since
    /// dropped.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::Home | Self::ShotPick | Self::Penalty { .. } => Self::Home,
            Self::Distance { .. } => Self::ShotPick,
            Self::Zone { outcome, .. } => Self::Distance { outcome },
            Self::Placement {
                outcome, distance, ..
            } => Self::Zone { outcome, distance },
            Self::PassBucket { distance, zone, .. } => Self::Placement {
                outcome: ShotOutcome::Goal,
                distance,
                zone,
            },
        }
    }
}

/// Result of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Moved to the next step; nothing to persist yet.
    Advanced,
    /// The candidate is complete and valid and should be appended now.
    Ready(EventCandidate),
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderView {
    /// Active step and its data.
    pub step: RecorderStep,
    /// Fields accumulated so far, in wire form.
    pub candidate: EventCandidate,
    /// Whether an explicit commit would be accepted.
    pub can_commit: bool,
}

/// The input state machine for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotRecorder {
    match_id: Uuid,
    period: Period,
    phase: Phase,
    step: RecorderStep,
}

fn wrong_step(action: &str, step: RecorderStep) -> DomainError {
    DomainError::Validation(format!("cannot {action} in step {}", step.name()))
}

impl ShotRecorder {
    /// Creates an idle recorder.
    #[must_use]
    pub fn new(match_id: Uuid, period: Period, phase: Phase) -> Self {
        Self {
            match_id,
            period,
            phase,
            step: RecorderStep::Home,
        }
    }

    /// Returns the match being tagged.
    #[must_use]
    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    /// Returns the active step.
    #[must_use]
    pub fn step(&self) -> RecorderStep {
        self.step
    }

    /// Returns the phase the next event will be tagged with.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the period the next event will be tagged with.
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Switches period; the caller owns period semantics.
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    /// Overrides the controlling phase.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// HOME → `SHOT_PICK`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME.
    pub fn start_shot(&mut self) -> Result<(), DomainError> {
        if self.step != RecorderStep::Home {
            return Err(wrong_step("start a shot", self.step));
        }
        self.step = RecorderStep::ShotPick;
        Ok(())
    }

    /// HOME → PENALTY.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME.
    pub fn start_penalty(&mut self) -> Result<(), DomainError> {
        if self.step != RecorderStep::Home {
            return Err(wrong_step("start a penalty", self.step));
        }
        self.step = RecorderStep::Penalty {
            outcome: None,
            goal_cell: None,
        };
        Ok(())
    }

    /// Picks the shot outcome. A field-shot MISS is ready immediately.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside `SHOT_PICK` and PENALTY.
    pub fn select_outcome(
        &mut self,
        outcome: ShotOutcome,
        clock: &dyn MatchClock,
    ) -> Result<Selection, DomainError> {
        match self.step {
            RecorderStep::ShotPick if outcome == ShotOutcome::Miss => {
                let candidate = EventCandidate {
                    outcome: Some(ShotOutcome::Miss),
                    ..self.stamp(EventKind::Shot, clock)
                };
                self.ready(candidate)
            }
            RecorderStep::ShotPick => {
                self.step = RecorderStep::Distance { outcome };
                Ok(Selection::Advanced)
            }
            RecorderStep::Penalty { goal_cell, .. } => {
                self.step = RecorderStep::Penalty {
                    outcome: Some(outcome),
                    goal_cell,
                };
                Ok(Selection::Advanced)
            }
            step => Err(wrong_step("select an outcome", step)),
        }
    }

    /// DISTANCE → ZONE.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside DISTANCE.
    pub fn select_distance(&mut self, distance: Distance) -> Result<(), DomainError> {
        match self.step {
            RecorderStep::Distance { outcome } => {
                self.step = RecorderStep::Zone { outcome, distance };
                Ok(())
            }
            step => Err(wrong_step("select a distance", step)),
        }
    }

    /// ZONE → PLACEMENT.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside ZONE or for a zone outside
    /// 1..=5; the step is left unchanged.
    pub fn select_zone(&mut self, zone: u8) -> Result<(), DomainError> {
        match self.step {
            RecorderStep::Zone { outcome, distance } => {
                let zone = WidthZone::try_from(zone)?;
                self.step = RecorderStep::Placement {
                    outcome,
                    distance,
                    zone,
                };
                Ok(())
            }
            step => Err(wrong_step("select a zone", step)),
        }
    }

    /// Picks the goal cell. A SAVE is ready immediately; a GOAL moves on to
    /// the pass bucket.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside PLACEMENT and PENALTY, or for
    /// a cell outside 1..=6.
    pub fn select_placement(
        &mut self,
        goal_cell: u8,
        clock: &dyn MatchClock,
    ) -> Result<Selection, DomainError> {
        match self.step {
            RecorderStep::Placement {
                outcome: ShotOutcome::Goal,
                distance,
                zone,
            } => {
                let goal_cell = GoalCell::try_from(goal_cell)?;
                self.step = RecorderStep::PassBucket {
                    distance,
                    zone,
                    goal_cell,
                };
                Ok(Selection::Advanced)
            }
            RecorderStep::Placement {
                outcome,
                distance,
                zone,
            } => {
                let goal_cell = GoalCell::try_from(goal_cell)?;
                let candidate = EventCandidate {
                    outcome: Some(outcome),
                    zone: Some(zone.get()),
                    distance: Some(distance),
                    goal_cell: Some(goal_cell.get()),
                    ..self.stamp(EventKind::Shot, clock)
                };
                self.ready(candidate)
            }
            RecorderStep::Penalty { outcome, .. } => {
                let goal_cell = GoalCell::try_from(goal_cell)?;
                self.step = RecorderStep::Penalty {
                    outcome,
                    goal_cell: Some(goal_cell),
                };
                Ok(Selection::Advanced)
            }
            step => Err(wrong_step("select a placement", step)),
        }
    }

    /// `PASS_BUCKET` → ready.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside `PASS_BUCKET`.
    pub fn select_pass_bucket(
        &mut self,
        bucket: PassBucket,
        clock: &dyn MatchClock,
    ) -> Result<Selection, DomainError> {
        match self.step {
            RecorderStep::PassBucket {
                distance,
                zone,
                goal_cell,
            } => {
                let candidate = EventCandidate {
                    outcome: Some(ShotOutcome::Goal),
                    zone: Some(zone.get()),
                    distance: Some(distance),
                    goal_cell: Some(goal_cell.get()),
                    passes: Some(bucket.stored_count()),
                    ..self.stamp(EventKind::Shot, clock)
                };
                self.ready(candidate)
            }
            step => Err(wrong_step("select a pass bucket", step)),
        }
    }

    /// Explicit commit of the in-progress candidate.
    ///
    /// Only a penalty is committed this way; every other flow becomes ready
    /// through its final selection. A goal waiting for its pass bucket is
    /// refused.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the candidate is incomplete or
    /// invalid. The step is never changed.
    pub fn commit(&self, clock: &dyn MatchClock) -> Result<EventCandidate, DomainError> {
        match self.step {
            RecorderStep::Penalty { outcome, goal_cell } => {
                let candidate = EventCandidate {
                    outcome,
                    goal_cell: goal_cell.map(GoalCell::get),
                    is_penalty: true,
                    ..self.stamp(EventKind::Shot, clock)
                };
                candidate.into_event()?;
                Ok(candidate)
            }
            RecorderStep::PassBucket { .. } => Err(DomainError::Validation(
                "a pass bucket must be selected before a goal is saved".to_owned(),
            )),
            step => Err(wrong_step("commit", step)),
        }
    }

    /// Whether [`ShotRecorder::commit`] would currently succeed.
    #[must_use]
    pub fn can_commit(&self) -> bool {
        match self.step {
            RecorderStep::Penalty { outcome, goal_cell } => EventCandidate {
                outcome,
                goal_cell: goal_cell.map(GoalCell::get),
                is_penalty: true,
                timestamp: Some(0),
                ..self.base(EventKind::Shot)
            }
            .into_event()
            .is_ok(),
            _ => false,
        }
    }

    /// Single-step turnover candidate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME.
    pub fn record_turnover(
        &self,
        turnover_type: TurnoverType,
        clock: &dyn MatchClock,
    ) -> Result<EventCandidate, DomainError> {
        if self.step != RecorderStep::Home {
            return Err(wrong_step("record a turnover", self.step));
        }
        Ok(EventCandidate {
            turnover_type: Some(turnover_type),
            label: Some(turnover_type.default_label().to_owned()),
            ..self.stamp(EventKind::Turnover, clock)
        })
    }

    /// Single-step free-throw candidate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` outside HOME.
    pub fn record_free_throw(&self, clock: &dyn MatchClock) -> Result<EventCandidate, DomainError> {
        if self.step != RecorderStep::Home {
            return Err(wrong_step("record a free throw", self.step));
        }
        Ok(self.stamp(EventKind::FreeThrow, clock))
    }

    /// Acknowledges that `event` was appended: back to HOME, and possession
    /// flips after any shot or turnover.
    pub fn committed(&mut self, event: &MatchEvent) {
        self.step = RecorderStep::Home;
        if event.kind() != EventKind::FreeThrow {
            self.phase = event.phase.toggled();
        }
    }

    /// Acknowledges that `event` was undone: possession goes back to the
    /// side that had it when the event was tagged.
    pub fn undone(&mut self, event: &MatchEvent) {
        if event.kind() != EventKind::FreeThrow {
            self.phase = event.phase;
        }
    }

    /// Goes back one step.
    pub fn back(&mut self) {
        self.step = self.step.previous();
    }

    /// Drops the in-progress candidate.
    pub fn cancel(&mut self) {
        self.step = RecorderStep::Home;
    }

    /// Current state for rendering.
    #[must_use]
    pub fn view(&self) -> RecorderView {
        let mut candidate = self.base(EventKind::Shot);
        match self.step {
            RecorderStep::Home => candidate.kind = None,
            RecorderStep::ShotPick => {}
            RecorderStep::Distance { outcome } => candidate.outcome = Some(outcome),
            RecorderStep::Zone { outcome, distance } => {
                candidate.outcome = Some(outcome);
                candidate.distance = Some(distance);
            }
            RecorderStep::Placement {
                outcome,
                distance,
                zone,
            } => {
                candidate.outcome = Some(outcome);
                candidate.distance = Some(distance);
                candidate.zone = Some(zone.get());
            }
            RecorderStep::PassBucket {
                distance,
                zone,
                goal_cell,
            } => {
                candidate.outcome = Some(ShotOutcome::Goal);
                candidate.distance = Some(distance);
                candidate.zone = Some(zone.get());
                candidate.goal_cell = Some(goal_cell.get());
            }
            RecorderStep::Penalty { outcome, goal_cell } => {
                candidate.outcome = outcome;
                candidate.goal_cell = goal_cell.map(GoalCell::get);
                candidate.is_penalty = true;
            }
        }
        RecorderView {
            step: self.step,
            candidate,
            can_commit: self.can_commit(),
        }
    }

    fn base(&self, kind: EventKind) -> EventCandidate {
        EventCandidate {
            match_id: Some(self.match_id),
            period: Some(self.period.into()),
            phase: Some(self.phase),
            kind: Some(kind),
            ..EventCandidate::default()
        }
    }

    fn stamp(&self, kind: EventKind, clock: &dyn MatchClock) -> EventCandidate {
        EventCandidate {
            timestamp: Some(clock.elapsed_ms()),
            ..self.base(kind)
        }
    }

    fn ready(&self, candidate: EventCandidate) -> Result<Selection, DomainError> {
        candidate.into_event()?;
        Ok(Selection::Ready(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StoppedClock(u64);

    impl MatchClock for StoppedClock {
        fn elapsed_ms(&self) -> u64 {
            self.0
        }
    }

    fn recorder() -> ShotRecorder {
        ShotRecorder::new(Uuid::new_v4(), Period::First, Phase::Attack)
    }

    fn ready(selection: Selection) -> EventCandidate {
        match selection {
            Selection::Ready(candidate) => candidate,
            Selection::Advanced => panic!("expected a ready candidate"),
        }
    }

    #[test]
    fn test_goal_flow_waits_for_pass_bucket() {
        // Arrange
        let clock = StoppedClock(90_000);
        let mut rec = recorder();

        // Act
        rec.start_shot().unwrap();
        assert_eq!(
            rec.select_outcome(ShotOutcome::Goal, &clock).unwrap(),
            Selection::Advanced
        );
        rec.select_distance(Distance::Nine).unwrap();
        rec.select_zone(3).unwrap();
        assert_eq!(
            rec.select_placement(5, &clock).unwrap(),
            Selection::Advanced
        );
        let candidate = ready(rec.select_pass_bucket(PassBucket::Low, &clock).unwrap());

        // Assert
        assert_eq!(candidate.outcome, Some(ShotOutcome::Goal));
        assert_eq!(candidate.zone, Some(3));
        assert_eq!(candidate.distance, Some(Distance::Nine));
        assert_eq!(candidate.goal_cell, Some(5));
        assert_eq!(candidate.passes, Some(2));
        assert_eq!(candidate.timestamp, Some(90_000));
        assert!(matches!(rec.step(), RecorderStep::PassBucket { .. }));
    }

    #[test]
    fn test_commit_without_pass_bucket_is_refused() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_shot().unwrap();
        rec.select_outcome(ShotOutcome::Goal, &clock).unwrap();
        rec.select_distance(Distance::Six).unwrap();
        rec.select_zone(1).unwrap();
        rec.select_placement(2, &clock).unwrap();
        let before = rec.clone();

        let result = rec.commit(&clock);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(rec, before);
        assert!(matches!(rec.step(), RecorderStep::PassBucket { .. }));
    }

    #[test]
    fn test_save_is_ready_on_placement() {
        let clock = StoppedClock(1_000);
        let mut rec = recorder();
        rec.start_shot().unwrap();
        rec.select_outcome(ShotOutcome::Save, &clock).unwrap();
        rec.select_distance(Distance::Six).unwrap();
        rec.select_zone(5).unwrap();

        let candidate = ready(rec.select_placement(4, &clock).unwrap());

        assert_eq!(candidate.outcome, Some(ShotOutcome::Save));
        assert_eq!(candidate.goal_cell, Some(4));
        assert_eq!(candidate.passes, None);
    }

    #[test]
    fn test_miss_is_ready_without_location() {
        let clock = StoppedClock(1_000);
        let mut rec = recorder();
        rec.start_shot().unwrap();

        let candidate = ready(rec.select_outcome(ShotOutcome::Miss, &clock).unwrap());

        assert_eq!(candidate.zone, None);
        assert_eq!(candidate.distance, None);
        assert_eq!(candidate.goal_cell, None);
    }

    #[test]
    fn test_penalty_miss_commits_without_cell() {
        let clock = StoppedClock(5);
        let mut rec = recorder();
        rec.start_penalty().unwrap();
        rec.select_outcome(ShotOutcome::Miss, &clock).unwrap();

        let candidate = rec.commit(&clock).unwrap();

        assert!(candidate.is_penalty);
        assert_eq!(candidate.zone, None);
        assert!(rec.can_commit());
    }

    #[test]
    fn test_penalty_goal_without_cell_is_refused() {
        let clock = StoppedClock(5);
        let mut rec = recorder();
        rec.start_penalty().unwrap();
        rec.select_outcome(ShotOutcome::Goal, &clock).unwrap();

        assert!(!rec.can_commit());
        assert!(rec.commit(&clock).is_err());

        rec.select_placement(6, &clock).unwrap();
        assert!(rec.can_commit());
        assert_eq!(rec.commit(&clock).unwrap().goal_cell, Some(6));
    }

    #[test]
    fn test_penalty_without_outcome_is_refused() {
        let clock = StoppedClock(5);
        let mut rec = recorder();
        rec.start_penalty().unwrap();

        assert!(rec.commit(&clock).is_err());
    }

    #[test]
    fn test_back_walks_to_previous_step_and_drops_data() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_shot().unwrap();
        rec.select_outcome(ShotOutcome::Goal, &clock).unwrap();
        rec.select_distance(Distance::Nine).unwrap();
        rec.select_zone(2).unwrap();
        rec.select_placement(1, &clock).unwrap();

        rec.back();
        assert_eq!(
            rec.step(),
            RecorderStep::Placement {
                outcome: ShotOutcome::Goal,
                distance: Distance::Nine,
                zone: WidthZone::try_from(2).unwrap(),
            }
        );
        rec.back();
        assert_eq!(
            rec.step(),
            RecorderStep::Zone {
                outcome: ShotOutcome::Goal,
                distance: Distance::Nine,
            }
        );
        rec.back();
        assert_eq!(
            rec.step(),
            RecorderStep::Distance {
                outcome: ShotOutcome::Goal
            }
        );
        rec.back();
        assert_eq!(rec.step(), RecorderStep::ShotPick);
        rec.back();
        assert_eq!(rec.step(), RecorderStep::Home);
    }

    #[test]
    fn test_cancel_returns_home() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_shot().unwrap();
        rec.select_outcome(ShotOutcome::Save, &clock).unwrap();

        rec.cancel();

        assert_eq!(rec.step(), RecorderStep::Home);
        assert_eq!(rec.phase(), Phase::Attack);
    }

    #[test]
    fn test_invalid_zone_leaves_step_unchanged() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_shot().unwrap();
        rec.select_outcome(ShotOutcome::Goal, &clock).unwrap();
        rec.select_distance(Distance::Six).unwrap();

        assert!(rec.select_zone(9).is_err());
        assert!(matches!(rec.step(), RecorderStep::Zone { .. }));
    }

    #[test]
    fn test_selection_in_wrong_step_is_rejected() {
        let clock = StoppedClock(0);
        let mut rec = recorder();

        assert!(rec.select_distance(Distance::Six).is_err());
        assert!(rec.select_placement(1, &clock).is_err());
        assert!(rec.select_pass_bucket(PassBucket::Mid, &clock).is_err());
        assert!(rec.commit(&clock).is_err());
        assert_eq!(rec.step(), RecorderStep::Home);
    }

    #[test]
    fn test_committed_toggles_phase_except_for_free_throws() {
        let clock = StoppedClock(0);
        let mut rec = recorder();

        let free_throw = rec.record_free_throw(&clock).unwrap().into_event().unwrap();
        rec.committed(&free_throw);
        assert_eq!(rec.phase(), Phase::Attack);

        let turnover = rec
            .record_turnover(TurnoverType::Steal, &clock)
            .unwrap()
            .into_event()
            .unwrap();
        rec.committed(&turnover);
        assert_eq!(rec.phase(), Phase::Defense);

        rec.undone(&turnover);
        assert_eq!(rec.phase(), Phase::Attack);
    }

    #[test]
    fn test_turnover_requires_idle_recorder() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_shot().unwrap();

        assert!(rec.record_turnover(TurnoverType::PassivePlay, &clock).is_err());
    }

    #[test]
    fn test_view_exposes_partial_candidate() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_shot().unwrap();
        rec.select_outcome(ShotOutcome::Save, &clock).unwrap();
        rec.select_distance(Distance::Nine).unwrap();

        let view = rec.view();

        assert_eq!(view.candidate.outcome, Some(ShotOutcome::Save));
        assert_eq!(view.candidate.distance, Some(Distance::Nine));
        assert_eq!(view.candidate.zone, None);
        assert!(!view.can_commit);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["step"]["step"], "ZONE");
        assert_eq!(json["step"]["distance"], "9m");
    }

    #[test]
    fn test_recorder_state_is_serializable() {
        let clock = StoppedClock(0);
        let mut rec = recorder();
        rec.start_penalty().unwrap();
        rec.select_outcome(ShotOutcome::Goal, &clock).unwrap();

        let json = serde_json::to_string(&rec).unwrap();
        let back: ShotRecorder = serde_json::from_str(&json).unwrap();

        assert_eq!(back, rec);
    }
}
