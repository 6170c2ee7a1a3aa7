//! Fixture builders shared across test suites.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use handtag_core::repository::{MatchRecord, MatchStatus};
use uuid::Uuid;

/// Fixed timestamp used across tests.
///
/// # Panics
///
/// Never; the date is a valid constant.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// An in-progress match between two sample teams.
///
/// # Panics
///
/// Never; the date is a valid constant.
#[must_use]
pub fn match_record(match_id: Uuid) -> MatchRecord {
    MatchRecord {
        match_id,
        home_team: "HC Aalborg".to_owned(),
        away_team: "GOG".to_owned(),
        match_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        status: MatchStatus::InProgress,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}
