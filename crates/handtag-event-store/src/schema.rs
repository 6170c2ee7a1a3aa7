//! Event store database schema.

/// SQL creating the match and event tables. Safe to run on every start.
pub const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS matches (
    match_id    TEXT PRIMARY KEY,
    home_team   TEXT NOT NULL,
    away_team   TEXT NOT NULL,
    match_date  TEXT NOT NULL,
    status      TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS match_events (
    event_id        TEXT PRIMARY KEY,
    match_id        TEXT NOT NULL REFERENCES matches (match_id) ON DELETE CASCADE,
    event_type      TEXT NOT NULL,
    payload         TEXT NOT NULL,
    sequence_number INTEGER NOT NULL,
    recorded_at     TEXT NOT NULL,
    UNIQUE (match_id, sequence_number)
);

CREATE INDEX IF NOT EXISTS idx_match_events_match_id
    ON match_events (match_id, sequence_number);

CREATE INDEX IF NOT EXISTS idx_matches_created_at
    ON matches (created_at);
";
