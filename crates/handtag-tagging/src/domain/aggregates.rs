//! Read models folded from a match log.

use handtag_core::projection::Projection;
use serde::Serialize;

use super::events::{MatchEvent, ScoreDelta};

/// Running score of a match, derived from its events.
///
/// The score is never stored on its own: it is replayed from the log, and an
/// undo reverts exactly the delta the removed event carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    /// Goals for the tagged (home) team.
    pub home: u32,
    /// Goals for the opponent.
    pub away: u32,
}

impl Scoreboard {
    fn shift(&mut self, delta: ScoreDelta, sign: i32) {
        self.home = self.home.saturating_add_signed(delta.home * sign);
        self.away = self.away.saturating_add_signed(delta.away * sign);
    }
}

impl Projection for Scoreboard {
    type Event = MatchEvent;

    fn apply(&mut self, event: &Self::Event) {
        self.shift(event.score_delta(), 1);
    }

    fn revert(&mut self, event: &Self::Event) {
        self.shift(event.score_delta(), -1);
    }
}
