//! Event model for the Tagging context.
//!
//! A [`MatchEvent`] is the typed, always-valid form of one tagged occurrence.
//! Its payload is a tagged variant per kind (and per penalty flag) so that
//! zone and distance can only travel together and penalties can never carry
//! them. [`EventCandidate`] is the flat wire form used for storage, import and
//! export; [`EventCandidate::into_event`] is the single gate between the two.

use handtag_core::error::DomainError;
use handtag_core::event::TaggedEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type identifier for shot events.
pub const SHOT_EVENT_TYPE: &str = "SHOT";

/// Event type identifier for turnover events.
pub const TURNOVER_EVENT_TYPE: &str = "TURNOVER";

/// Event type identifier for free-throw events.
pub const FREE_THROW_EVENT_TYPE: &str = "FREE_THROW";

/// Pass count stored for the "5 or more passes" bucket.
pub const HIGH_PASS_SENTINEL: u8 = 99;

/// Match period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Period {
    /// First half.
    First,
    /// Second half.
    Second,
}

impl TryFrom<u8> for Period {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(DomainError::Validation(format!(
                "period must be 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        match period {
            Period::First => 1,
            Period::Second => 2,
        }
    }
}

/// Which side the tagged team is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// The tagged team has the ball.
    Attack,
    /// The opponent has the ball.
    Defense,
}

impl Phase {
    /// Returns the opposite phase (possession change).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Attack => Self::Defense,
            Self::Defense => Self::Attack,
        }
    }
}

/// Closed set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A shot at goal.
    Shot,
    /// Possession lost without a shot.
    Turnover,
    /// A free throw awarded.
    FreeThrow,
}

impl EventKind {
    /// Returns the canonical kind name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shot => SHOT_EVENT_TYPE,
            Self::Turnover => TURNOVER_EVENT_TYPE,
            Self::FreeThrow => FREE_THROW_EVENT_TYPE,
        }
    }
}

/// Result of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotOutcome {
    /// The ball went in.
    Goal,
    /// The goalkeeper stopped it.
    Save,
    /// Off target.
    Miss,
}

/// Shooting distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Distance {
    /// Close range, at the six-metre line.
    #[serde(rename = "6m")]
    Six,
    /// Long range, from the nine-metre line or beyond.
    #[serde(rename = "9m")]
    Nine,
    /// The penalty mark.
    #[serde(rename = "7m")]
    Seven,
}

impl Distance {
    /// All distances in display order.
    pub const ALL: [Self; 3] = [Self::Six, Self::Nine, Self::Seven];
}

/// Horizontal court zone, 1 (left wing) to 5 (right wing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WidthZone(u8);

impl WidthZone {
    /// Number of zones across the court.
    pub const COUNT: u8 = 5;

    /// Returns the zone number.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Iterates over every zone, left to right.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT).map(Self)
    }
}

impl TryFrom<u8> for WidthZone {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::Validation(format!(
                "zone must be between 1 and {}, got {value}",
                Self::COUNT
            )))
        }
    }
}

impl From<WidthZone> for u8 {
    fn from(zone: WidthZone) -> Self {
        zone.0
    }
}

/// Target cell inside the goal, 1 to 6 (two rows of three).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GoalCell(u8);

impl GoalCell {
    /// Number of cells in the goal grid.
    pub const COUNT: u8 = 6;

    /// Returns the cell number.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, for heatmap arrays.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for GoalCell {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::Validation(format!(
                "goal cell must be between 1 and {}, got {value}",
                Self::COUNT
            )))
        }
    }
}

impl From<GoalCell> for u8 {
    fn from(cell: GoalCell) -> Self {
        cell.0
    }
}

/// Number of passes before a goal, grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassBucket {
    /// Two passes or fewer.
    Low,
    /// Three or four passes.
    Mid,
    /// Five passes or more.
    High,
}

impl PassBucket {
    /// Maps a stored pass count to its bucket.
    #[must_use]
    pub fn from_count(count: u8) -> Self {
        match count {
            0..=2 => Self::Low,
            3..=4 => Self::Mid,
            _ => Self::High,
        }
    }

    /// The count persisted when this bucket is picked.
    #[must_use]
    pub fn stored_count(self) -> u8 {
        match self {
            Self::Low => 2,
            Self::Mid => 4,
            Self::High => HIGH_PASS_SENTINEL,
        }
    }
}

/// Kind of turnover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnoverType {
    /// Ball stolen by the opponent.
    Steal,
    /// Ball lost (bad pass, dropped ball).
    LostBall,
    /// Technical fault (steps, double dribble, line).
    TechnicalFault,
    /// Passive play called.
    PassivePlay,
}

impl TurnoverType {
    /// All turnover types in display order.
    pub const ALL: [Self; 4] = [
        Self::Steal,
        Self::LostBall,
        Self::TechnicalFault,
        Self::PassivePlay,
    ];

    /// Label shown when none was supplied.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Steal => "Steal",
            Self::LostBall => "Lost ball",
            Self::TechnicalFault => "Technical fault",
            Self::PassivePlay => "Passive play",
        }
    }
}

/// Where a field shot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShotLocation {
    /// Horizontal zone.
    pub zone: WidthZone,
    /// Shooting distance.
    pub distance: Distance,
}

/// Shot payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    /// A shot from open play.
    Field {
        /// Result of the shot.
        outcome: ShotOutcome,
        /// Court position, absent for quick misses.
        location: Option<ShotLocation>,
        /// Goal cell, required unless the shot missed.
        goal_cell: Option<GoalCell>,
        /// Pass count before the goal, goals only.
        passes: Option<u8>,
    },
    /// A seven-metre throw.
    Penalty {
        /// Result of the shot.
        outcome: ShotOutcome,
        /// Goal cell, required unless the shot missed.
        goal_cell: Option<GoalCell>,
    },
}

impl Shot {
    /// Returns the shot result.
    #[must_use]
    pub fn outcome(&self) -> ShotOutcome {
        match self {
            Self::Field { outcome, .. } | Self::Penalty { outcome, .. } => *outcome,
        }
    }

    /// Returns the goal cell, if tagged.
    #[must_use]
    pub fn goal_cell(&self) -> Option<GoalCell> {
        match self {
            Self::Field { goal_cell, .. } | Self::Penalty { goal_cell, .. } => *goal_cell,
        }
    }

    /// Returns `true` for seven-metre throws.
    #[must_use]
    pub fn is_penalty(&self) -> bool {
        matches!(self, Self::Penalty { .. })
    }

    /// Returns the court location of a field shot.
    #[must_use]
    pub fn location(&self) -> Option<ShotLocation> {
        match self {
            Self::Field { location, .. } => *location,
            Self::Penalty { .. } => None,
        }
    }

    /// Returns the pass bucket of a field goal.
    #[must_use]
    pub fn pass_bucket(&self) -> Option<PassBucket> {
        match self {
            Self::Field { passes, .. } => passes.map(PassBucket::from_count),
            Self::Penalty { .. } => None,
        }
    }

    /// Distance bucket used by the statistics: penalties count as `7m`.
    #[must_use]
    pub fn distance_bucket(&self) -> Option<Distance> {
        match self {
            Self::Field { location, .. } => location.map(|l| l.distance),
            Self::Penalty { .. } => Some(Distance::Seven),
        }
    }

    /// Checks the invariants the variant shape cannot express.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a non-miss has no goal cell or a
    /// non-goal carries a pass count.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.outcome() != ShotOutcome::Miss && self.goal_cell().is_none() {
            return Err(DomainError::Validation(
                "a goal or save must carry a goal cell".to_owned(),
            ));
        }
        if let Self::Field {
            outcome,
            passes: Some(_),
            ..
        } = self
        {
            if *outcome != ShotOutcome::Goal {
                return Err(DomainError::Validation(
                    "pass count is only allowed on goals".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Turnover payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turnover {
    /// Kind of turnover.
    pub turnover_type: TurnoverType,
    /// Display label.
    pub label: String,
}

impl Turnover {
    /// Creates a turnover carrying the default label for its type.
    #[must_use]
    pub fn new(turnover_type: TurnoverType) -> Self {
        Self {
            turnover_type,
            label: turnover_type.default_label().to_owned(),
        }
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetail {
    /// A shot.
    Shot(Shot),
    /// A turnover.
    Turnover(Turnover),
    /// A free throw; presence alone is the information.
    FreeThrow,
}

impl EventDetail {
    /// Returns the kind of this payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Shot(_) => EventKind::Shot,
            Self::Turnover(_) => EventKind::Turnover,
            Self::FreeThrow => EventKind::FreeThrow,
        }
    }
}

/// Change in score caused by one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDelta {
    /// Goals for the tagged (home) team.
    pub home: i32,
    /// Goals for the opponent.
    pub away: i32,
}

/// One tagged occurrence in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EventCandidate", try_from = "EventCandidate")]
pub struct MatchEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Owning match.
    pub match_id: Uuid,
    /// Elapsed match-clock milliseconds when tagged.
    pub timestamp_ms: u64,
    /// Match period.
    pub period: Period,
    /// Attacking or defending.
    pub phase: Phase,
    /// Flagged for review.
    pub important: bool,
    /// Kind-specific payload.
    pub detail: EventDetail,
}

impl MatchEvent {
    /// Returns the kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.detail.kind()
    }

    /// Returns the shot payload, if this is a shot.
    #[must_use]
    pub fn shot(&self) -> Option<&Shot> {
        match &self.detail {
            EventDetail::Shot(shot) => Some(shot),
            _ => None,
        }
    }

    /// Returns the turnover payload, if this is a turnover.
    #[must_use]
    pub fn turnover(&self) -> Option<&Turnover> {
        match &self.detail {
            EventDetail::Turnover(turnover) => Some(turnover),
            _ => None,
        }
    }

    /// Returns `true` for shots that resulted in a goal.
    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.shot()
            .is_some_and(|shot| shot.outcome() == ShotOutcome::Goal)
    }

    /// Score change this event causes. Attack goals count for the home side.
    #[must_use]
    pub fn score_delta(&self) -> ScoreDelta {
        if !self.is_goal() {
            return ScoreDelta::default();
        }
        match self.phase {
            Phase::Attack => ScoreDelta { home: 1, away: 0 },
            Phase::Defense => ScoreDelta { home: 0, away: 1 },
        }
    }

    /// Checks every invariant of a well-formed event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first broken rule.
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.detail {
            EventDetail::Shot(shot) => shot.validate(),
            EventDetail::Turnover(_) | EventDetail::FreeThrow => Ok(()),
        }
    }
}

impl TaggedEvent for MatchEvent {
    fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of the flat candidate form to Value is infallible.
        serde_json::to_value(EventCandidate::from(self.clone()))
            .expect("EventCandidate serialization is infallible")
    }

    fn event_id(&self) -> Uuid {
        self.id
    }

    fn match_id(&self) -> Uuid {
        self.match_id
    }
}

/// Flat, loosely-typed event as it arrives from the recorder, the store or
/// a backup file. Nothing is guaranteed until [`EventCandidate::into_event`]
/// accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCandidate {
    /// Event identifier; assigned on append when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Owning match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
    /// Elapsed match-clock milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// Match period, 1 or 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u8>,
    /// Attacking or defending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    /// Event kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    /// Shot result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ShotOutcome>,
    /// Width zone, 1 to 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<u8>,
    /// Shooting distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Distance>,
    /// Goal cell, 1 to 6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_cell: Option<u8>,
    /// Pass count before a goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passes: Option<u8>,
    /// Seven-metre throw.
    #[serde(default)]
    pub is_penalty: bool,
    /// Turnover kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover_type: Option<TurnoverType>,
    /// Turnover display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Flagged for review.
    #[serde(default)]
    pub important: bool,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::Validation(format!("{field} is required")))
}

fn forbidden<T>(value: Option<&T>, field: &str, kind: EventKind) -> Result<(), DomainError> {
    match value {
        Some(_) => Err(DomainError::Validation(format!(
            "{field} is not allowed on {} events",
            kind.as_str()
        ))),
        None => Ok(()),
    }
}

impl EventCandidate {
    /// Validates the candidate and converts it to a typed event. A missing
    /// identifier is replaced by a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on the first broken invariant; the
    /// candidate is never coerced into a valid-looking event.
    pub fn into_event(&self) -> Result<MatchEvent, DomainError> {
        let match_id = required(self.match_id, "matchId")?;
        let timestamp_ms = required(self.timestamp, "timestamp")?;
        let period = Period::try_from(required(self.period, "period")?)?;
        let phase = required(self.phase, "phase")?;
        let kind = required(self.kind, "kind")?;

        let detail = match kind {
            EventKind::Shot => EventDetail::Shot(self.shot_detail()?),
            EventKind::Turnover => {
                self.reject_shot_fields(kind)?;
                let turnover_type = required(self.turnover_type, "turnoverType")?;
                let label = self
                    .label
                    .clone()
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| turnover_type.default_label().to_owned());
                EventDetail::Turnover(Turnover {
                    turnover_type,
                    label,
                })
            }
            EventKind::FreeThrow => {
                self.reject_shot_fields(kind)?;
                forbidden(self.turnover_type.as_ref(), "turnoverType", kind)?;
                forbidden(self.label.as_ref(), "label", kind)?;
                EventDetail::FreeThrow
            }
        };

        let event = MatchEvent {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            match_id,
            timestamp_ms,
            period,
            phase,
            important: self.important,
            detail,
        };
        event.validate()?;
        Ok(event)
    }

    fn shot_detail(&self) -> Result<Shot, DomainError> {
        let kind = EventKind::Shot;
        forbidden(self.turnover_type.as_ref(), "turnoverType", kind)?;
        forbidden(self.label.as_ref(), "label", kind)?;

        let outcome = required(self.outcome, "outcome")?;
        let goal_cell = self.goal_cell.map(GoalCell::try_from).transpose()?;

        if self.is_penalty {
            if self.zone.is_some() || self.distance.is_some() {
                return Err(DomainError::Validation(
                    "a penalty must not carry zone or distance".to_owned(),
                ));
            }
            if self.passes.is_some() {
                return Err(DomainError::Validation(
                    "a penalty must not carry a pass count".to_owned(),
                ));
            }
            return Ok(Shot::Penalty { outcome, goal_cell });
        }

        let location = match (self.zone, self.distance) {
            (Some(zone), Some(distance)) => Some(ShotLocation {
                zone: WidthZone::try_from(zone)?,
                distance,
            }),
            (None, None) => None,
            _ => {
                return Err(DomainError::Validation(
                    "zone and distance must be given together".to_owned(),
                ));
            }
        };

        Ok(Shot::Field {
            outcome,
            location,
            goal_cell,
            passes: self.passes,
        })
    }

    fn reject_shot_fields(&self, kind: EventKind) -> Result<(), DomainError> {
        forbidden(self.outcome.as_ref(), "outcome", kind)?;
        forbidden(self.zone.as_ref(), "zone", kind)?;
        forbidden(self.distance.as_ref(), "distance", kind)?;
        forbidden(self.goal_cell.as_ref(), "goalCell", kind)?;
        forbidden(self.passes.as_ref(), "passes", kind)?;
        if self.is_penalty {
            return Err(DomainError::Validation(format!(
                "isPenalty is not allowed on {} events",
                kind.as_str()
            )));
        }
        Ok(())
    }
}

/// Returns `true` when the candidate satisfies every event invariant.
#[must_use]
pub fn is_valid_event(candidate: &EventCandidate) -> bool {
    candidate.into_event().is_ok()
}

impl From<MatchEvent> for EventCandidate {
    fn from(event: MatchEvent) -> Self {
        let mut candidate = Self {
            id: Some(event.id),
            match_id: Some(event.match_id),
            timestamp: Some(event.timestamp_ms),
            period: Some(event.period.into()),
            phase: Some(event.phase),
            kind: Some(event.kind()),
            important: event.important,
            ..Self::default()
        };
        match event.detail {
            EventDetail::Shot(shot) => {
                candidate.outcome = Some(shot.outcome());
                candidate.goal_cell = shot.goal_cell().map(u8::from);
                candidate.is_penalty = shot.is_penalty();
                if let Shot::Field {
                    location, passes, ..
                } = shot
                {
                    candidate.zone = location.map(|l| l.zone.get());
                    candidate.distance = location.map(|l| l.distance);
                    candidate.passes = passes;
                }
            }
            EventDetail::Turnover(turnover) => {
                candidate.turnover_type = Some(turnover.turnover_type);
                candidate.label = Some(turnover.label);
            }
            EventDetail::FreeThrow => {}
        }
        candidate
    }
}

impl TryFrom<EventCandidate> for MatchEvent {
    type Error = DomainError;

    fn try_from(candidate: EventCandidate) -> Result<Self, Self::Error> {
        candidate.into_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(kind: EventKind) -> EventCandidate {
        EventCandidate {
            match_id: Some(Uuid::new_v4()),
            timestamp: Some(61_000),
            period: Some(1),
            phase: Some(Phase::Attack),
            kind: Some(kind),
            ..EventCandidate::default()
        }
    }

    fn field_goal() -> EventCandidate {
        EventCandidate {
            outcome: Some(ShotOutcome::Goal),
            zone: Some(3),
            distance: Some(Distance::Nine),
            goal_cell: Some(5),
            passes: Some(PassBucket::Low.stored_count()),
            ..base(EventKind::Shot)
        }
    }

    #[test]
    fn test_field_goal_with_all_fields_is_valid() {
        // Arrange
        let candidate = field_goal();

        // Act
        let event = candidate.into_event().unwrap();

        // Assert
        let shot = event.shot().unwrap();
        assert_eq!(shot.outcome(), ShotOutcome::Goal);
        assert_eq!(shot.location().unwrap().zone.get(), 3);
        assert_eq!(shot.pass_bucket(), Some(PassBucket::Low));
        assert_eq!(event.score_delta(), ScoreDelta { home: 1, away: 0 });
    }

    #[test]
    fn test_miss_without_location_or_cell_is_valid() {
        let candidate = EventCandidate {
            outcome: Some(ShotOutcome::Miss),
            ..base(EventKind::Shot)
        };

        assert!(is_valid_event(&candidate));
    }

    #[test]
    fn test_save_without_goal_cell_is_rejected() {
        let candidate = EventCandidate {
            outcome: Some(ShotOutcome::Save),
            zone: Some(1),
            distance: Some(Distance::Six),
            ..base(EventKind::Shot)
        };

        let err = candidate.into_event().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_zone_without_distance_is_rejected() {
        let candidate = EventCandidate {
            distance: None,
            ..field_goal()
        };

        assert!(!is_valid_event(&candidate));
    }

    #[test]
    fn test_penalty_with_zone_is_rejected() {
        let candidate = EventCandidate {
            is_penalty: true,
            passes: None,
            ..field_goal()
        };

        assert!(!is_valid_event(&candidate));
    }

    #[test]
    fn test_penalty_miss_without_cell_is_valid() {
        let candidate = EventCandidate {
            outcome: Some(ShotOutcome::Miss),
            is_penalty: true,
            ..base(EventKind::Shot)
        };

        let event = candidate.into_event().unwrap();
        let shot = event.shot().unwrap();
        assert!(shot.is_penalty());
        assert!(shot.location().is_none());
        assert_eq!(shot.distance_bucket(), Some(Distance::Seven));
    }

    #[test]
    fn test_passes_on_save_are_rejected() {
        let candidate = EventCandidate {
            outcome: Some(ShotOutcome::Save),
            ..field_goal()
        };

        assert!(!is_valid_event(&candidate));
    }

    #[test]
    fn test_out_of_range_zone_and_cell_are_rejected() {
        let bad_zone = EventCandidate {
            zone: Some(6),
            ..field_goal()
        };
        let bad_cell = EventCandidate {
            goal_cell: Some(0),
            ..field_goal()
        };

        assert!(!is_valid_event(&bad_zone));
        assert!(!is_valid_event(&bad_cell));
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let candidate = EventCandidate {
            period: Some(3),
            ..field_goal()
        };

        assert!(!is_valid_event(&candidate));
    }

    #[test]
    fn test_missing_phase_is_rejected() {
        let candidate = EventCandidate {
            phase: None,
            ..field_goal()
        };

        let err = candidate.into_event().unwrap_err();
        assert_eq!(err.to_string(), "validation error: phase is required");
    }

    #[test]
    fn test_turnover_gets_default_label() {
        let candidate = EventCandidate {
            turnover_type: Some(TurnoverType::LostBall),
            ..base(EventKind::Turnover)
        };

        let event = candidate.into_event().unwrap();
        assert_eq!(event.turnover().unwrap().label, "Lost ball");
    }

    #[test]
    fn test_turnover_with_shot_fields_is_rejected() {
        let candidate = EventCandidate {
            turnover_type: Some(TurnoverType::Steal),
            outcome: Some(ShotOutcome::Goal),
            ..base(EventKind::Turnover)
        };

        assert!(!is_valid_event(&candidate));
    }

    #[test]
    fn test_free_throw_has_no_payload() {
        let event = base(EventKind::FreeThrow).into_event().unwrap();

        assert_eq!(event.detail, EventDetail::FreeThrow);
        assert_eq!(event.score_delta(), ScoreDelta::default());
    }

    #[test]
    fn test_defense_goal_scores_for_away_side() {
        let candidate = EventCandidate {
            phase: Some(Phase::Defense),
            ..field_goal()
        };

        let event = candidate.into_event().unwrap();
        assert_eq!(event.score_delta(), ScoreDelta { home: 0, away: 1 });
    }

    #[test]
    fn test_wire_form_uses_upper_snake_and_camel_case() {
        let event = field_goal().into_event().unwrap();

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["kind"], "SHOT");
        assert_eq!(json["phase"], "ATTACK");
        assert_eq!(json["distance"], "9m");
        assert_eq!(json["goalCell"], 5);
        assert_eq!(json["isPenalty"], false);
        let back: MatchEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_pass_bucket_ranges() {
        assert_eq!(PassBucket::from_count(0), PassBucket::Low);
        assert_eq!(PassBucket::from_count(2), PassBucket::Low);
        assert_eq!(PassBucket::from_count(3), PassBucket::Mid);
        assert_eq!(PassBucket::from_count(4), PassBucket::Mid);
        assert_eq!(PassBucket::from_count(5), PassBucket::High);
        assert_eq!(PassBucket::from_count(HIGH_PASS_SENTINEL), PassBucket::High);
    }

    #[test]
    fn test_phase_toggle() {
        assert_eq!(Phase::Attack.toggled(), Phase::Defense);
        assert_eq!(Phase::Defense.toggled(), Phase::Attack);
    }
}
