//! The aggregation engine: a pure fold of a match log into summary figures.
//!
//! Percentages are whole numbers rounded half-up, and 0 whenever their
//! denominator is 0. The same input always yields the same `Summary`.

use std::collections::BTreeMap;

use handtag_tagging::domain::events::{
    Distance, EventDetail, GoalCell, MatchEvent, PassBucket, Phase, Shot, ShotOutcome,
    TurnoverType, WidthZone,
};
use serde::Serialize;

/// Integer percentage of `part` over `whole`, rounded half-up.
#[must_use]
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// A count and its share of the relevant total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountPct {
    /// Raw count.
    pub count: u32,
    /// Rounded percentage.
    pub pct: u32,
}

impl CountPct {
    fn of(count: u32, whole: u32) -> Self {
        Self {
            count,
            pct: percent(count, whole),
        }
    }
}

/// Shots from one distance or zone bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    /// Shots taken from the bucket.
    pub count: u32,
    /// Goals scored from the bucket.
    pub goals: u32,
    /// Goals over shots, rounded.
    pub eff_pct: u32,
}

/// Shots faced from one distance or zone bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveBucketStats {
    /// Shots faced from the bucket.
    pub count: u32,
    /// Saves made on them.
    pub saves: u32,
    /// Saves over shots, rounded.
    pub save_pct: u32,
}

/// Goals grouped by the number of passes before them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    /// Two passes or fewer.
    pub low: CountPct,
    /// Three or four passes.
    pub mid: CountPct,
    /// Five passes or more.
    pub high: CountPct,
}

/// Turnovers by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnoverStats {
    /// Count per type; every type is present.
    pub by_type: BTreeMap<TurnoverType, u32>,
    /// All turnovers, as a share of total attacks.
    pub total: CountPct,
}

/// Statistics for one phase of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    /// Shots plus turnovers. Free throws are not attacks.
    pub total_attacks: u32,
    /// Shots, as a share of total attacks.
    pub shots: CountPct,
    /// Goals, as a share of total attacks.
    pub goals: CountPct,
    /// Saved shots, as a share of total attacks.
    pub saves: CountPct,
    /// Missed shots, as a share of total attacks.
    pub misses: CountPct,
    /// Goals over shots, rounded.
    pub efficiency: u32,
    /// Free throws awarded; not counted as attacks.
    pub free_throws: u32,
    /// Keyed `6m`, `9m` and `7m`; `7m` includes every penalty.
    pub by_distance: BTreeMap<Distance, BucketStats>,
    /// Keyed by width zone 1 to 5.
    pub by_zone: BTreeMap<u8, BucketStats>,
    /// Goals per goal cell, cell 1 first.
    pub goal_cells: [u32; GoalCell::COUNT as usize],
    /// Goals by passes played before the shot.
    pub passes: PassStats,
    /// Turnovers by type, plus their share of total attacks.
    pub turnovers: TurnoverStats,
}

/// The goalkeeper's view of the defensive phase: saves are the successes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalkeeperStats {
    /// Opponent shots plus turnovers.
    pub total_attacks: u32,
    /// Opponent shots, as a share of total attacks.
    pub shots_faced: CountPct,
    /// Saves, as a share of total attacks.
    pub saves: CountPct,
    /// Goals let in, as a share of total attacks.
    pub goals_conceded: CountPct,
    /// Opponent shots off target, as a share of total attacks.
    pub misses: CountPct,
    /// Shots on target: goals conceded plus saves.
    pub opportunities: u32,
    /// Saves over all shots faced, rounded.
    pub save_pct: u32,
    /// Saves over shots on target, rounded.
    pub save_pct_on_target: u32,
    /// Keyed `6m`, `9m` and `7m`; `7m` includes every penalty.
    pub by_distance: BTreeMap<Distance, SaveBucketStats>,
    /// Keyed by width zone 1 to 5.
    pub by_zone: BTreeMap<u8, SaveBucketStats>,
    /// Saves per goal cell, cell 1 first.
    pub save_cells: [u32; GoalCell::COUNT as usize],
}

/// Everything reported for a (possibly scope-filtered) log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Events the summary was computed from.
    pub event_count: usize,
    /// The tagged team in possession.
    pub attack: PhaseStats,
    /// The opponent in possession, counted from their side.
    pub defense: PhaseStats,
    /// The defensive phase seen from the goalkeeper.
    pub goalkeeper: GoalkeeperStats,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    count: u32,
    hits: u32,
}

/// Raw counts for one phase, with `hit` as the successful outcome.
#[derive(Debug)]
struct PhaseTally {
    hit: ShotOutcome,
    shots: u32,
    goals: u32,
    saves: u32,
    misses: u32,
    free_throws: u32,
    by_distance: BTreeMap<Distance, Tally>,
    by_zone: BTreeMap<u8, Tally>,
    cells: [u32; GoalCell::COUNT as usize],
    passes: BTreeMap<PassBucket, u32>,
    turnovers: BTreeMap<TurnoverType, u32>,
}

impl PhaseTally {
    fn new(hit: ShotOutcome) -> Self {
        Self {
            hit,
            shots: 0,
            goals: 0,
            saves: 0,
            misses: 0,
            free_throws: 0,
            by_distance: Distance::ALL.into_iter().map(|d| (d, Tally::default())).collect(),
            by_zone: WidthZone::all().map(|z| (z.get(), Tally::default())).collect(),
            cells: [0; GoalCell::COUNT as usize],
            passes: BTreeMap::new(),
            turnovers: TurnoverType::ALL.into_iter().map(|t| (t, 0)).collect(),
        }
    }

    fn collect<'a>(
        events: impl IntoIterator<Item = &'a MatchEvent>,
        phase: Phase,
        hit: ShotOutcome,
    ) -> Self {
        let mut tally = Self::new(hit);
        for event in events.into_iter().filter(|e| e.phase == phase) {
            match &event.detail {
                EventDetail::Shot(shot) => tally.add_shot(shot),
                EventDetail::Turnover(turnover) => {
                    *tally.turnovers.entry(turnover.turnover_type).or_default() += 1;
                }
                EventDetail::FreeThrow => tally.free_throws += 1,
            }
        }
        tally
    }

    fn add_shot(&mut self, shot: &Shot) {
        let outcome = shot.outcome();
        let is_hit = u32::from(outcome == self.hit);
        self.shots += 1;
        match outcome {
            ShotOutcome::Goal => self.goals += 1,
            ShotOutcome::Save => self.saves += 1,
            ShotOutcome::Miss => self.misses += 1,
        }

        if let Some(distance) = shot.distance_bucket() {
            let bucket = self.by_distance.entry(distance).or_default();
            bucket.count += 1;
            bucket.hits += is_hit;
        }
        if let Some(location) = shot.location() {
            let bucket = self.by_zone.entry(location.zone.get()).or_default();
            bucket.count += 1;
            bucket.hits += is_hit;
        }
        if is_hit == 1 {
            if let Some(cell) = shot.goal_cell() {
                self.cells[cell.index()] += 1;
            }
        }
        if outcome == ShotOutcome::Goal {
            if let Some(bucket) = shot.pass_bucket() {
                *self.passes.entry(bucket).or_default() += 1;
            }
        }
    }

    fn turnover_total(&self) -> u32 {
        self.turnovers.values().sum()
    }

    fn total_attacks(&self) -> u32 {
        self.shots + self.turnover_total()
    }

    fn into_phase_stats(self) -> PhaseStats {
        let total = self.total_attacks();
        let pass = |bucket| {
            CountPct::of(self.passes.get(&bucket).copied().unwrap_or(0), self.goals)
        };
        let eff = |tally: Tally| BucketStats {
            count: tally.count,
            goals: tally.hits,
            eff_pct: percent(tally.hits, tally.count),
        };
        PhaseStats {
            total_attacks: total,
            shots: CountPct::of(self.shots, total),
            goals: CountPct::of(self.goals, total),
            saves: CountPct::of(self.saves, total),
            misses: CountPct::of(self.misses, total),
            efficiency: percent(self.goals, self.shots),
            free_throws: self.free_throws,
            by_distance: self.by_distance.iter().map(|(d, t)| (*d, eff(*t))).collect(),
            by_zone: self.by_zone.iter().map(|(z, t)| (*z, eff(*t))).collect(),
            goal_cells: self.cells,
            passes: PassStats {
                low: pass(PassBucket::Low),
                mid: pass(PassBucket::Mid),
                high: pass(PassBucket::High),
            },
            turnovers: TurnoverStats {
                total: CountPct::of(self.turnover_total(), total),
                by_type: self.turnovers,
            },
        }
    }

    fn into_goalkeeper_stats(self) -> GoalkeeperStats {
        let total = self.total_attacks();
        let opportunities = self.goals + self.saves;
        let save = |tally: Tally| SaveBucketStats {
            count: tally.count,
            saves: tally.hits,
            save_pct: percent(tally.hits, tally.count),
        };
        GoalkeeperStats {
            total_attacks: total,
            shots_faced: CountPct::of(self.shots, total),
            saves: CountPct::of(self.saves, total),
            goals_conceded: CountPct::of(self.goals, total),
            misses: CountPct::of(self.misses, total),
            opportunities,
            save_pct: percent(self.saves, self.shots),
            save_pct_on_target: percent(self.saves, opportunities),
            by_distance: self.by_distance.iter().map(|(d, t)| (*d, save(*t))).collect(),
            by_zone: self.by_zone.iter().map(|(z, t)| (*z, save(*t))).collect(),
            save_cells: self.cells,
        }
    }
}

/// Summarizes a log. Callers filter by scope first.
#[must_use]
pub fn summarize(events: &[MatchEvent]) -> Summary {
    Summary {
        event_count: events.len(),
        attack: PhaseTally::collect(events, Phase::Attack, ShotOutcome::Goal).into_phase_stats(),
        defense: PhaseTally::collect(events, Phase::Defense, ShotOutcome::Goal).into_phase_stats(),
        goalkeeper: PhaseTally::collect(events, Phase::Defense, ShotOutcome::Save)
            .into_goalkeeper_stats(),
    }
}
