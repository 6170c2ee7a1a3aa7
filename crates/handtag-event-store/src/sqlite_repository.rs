//! `SQLite` implementation of the storage traits.
//!
//! Identifiers are stored as hyphenated text and payloads as JSON text, so
//! the database stays readable with the stock `sqlite3` shell. Every write
//! runs in its own transaction.

use std::fmt::Display;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use handtag_core::error::DomainError;
use handtag_core::repository::{
    EventRepository, MatchRecord, MatchRepository, MatchStatus, StoredEvent,
};

use crate::schema::CREATE_TABLES;

fn storage_error(e: impl Display) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn uuid_column(row: &SqliteRow, column: &str) -> Result<Uuid, DomainError> {
    let raw: String = row.try_get(column).map_err(storage_error)?;
    Uuid::parse_str(&raw).map_err(storage_error)
}

fn event_from_row(row: &SqliteRow) -> Result<StoredEvent, DomainError> {
    let payload: String = row.try_get("payload").map_err(storage_error)?;
    Ok(StoredEvent {
        event_id: uuid_column(row, "event_id")?,
        match_id: uuid_column(row, "match_id")?,
        event_type: row.try_get("event_type").map_err(storage_error)?,
        payload: serde_json::from_str(&payload).map_err(storage_error)?,
        sequence_number: row.try_get("sequence_number").map_err(storage_error)?,
        recorded_at: row.try_get("recorded_at").map_err(storage_error)?,
    })
}

fn match_from_row(row: &SqliteRow) -> Result<MatchRecord, DomainError> {
    let status: String = row.try_get("status").map_err(storage_error)?;
    Ok(MatchRecord {
        match_id: uuid_column(row, "match_id")?,
        home_team: row.try_get("home_team").map_err(storage_error)?,
        away_team: row.try_get("away_team").map_err(storage_error)?,
        match_date: row.try_get::<NaiveDate, _>("match_date").map_err(storage_error)?,
        status: MatchStatus::from_str(&status).map_err(storage_error)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(storage_error)?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(storage_error)?,
    })
}

const EVENT_COLUMNS: &str =
    "event_id, match_id, event_type, payload, sequence_number, recorded_at";

const MATCH_COLUMNS: &str =
    "match_id, home_team, away_team, match_date, status, created_at, updated_at";

/// SQLite-backed repository for matches and events.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Wraps an existing pool. The schema must already exist; see
    /// [`SqliteRepository::migrate`].
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `url` and applies the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the URL is invalid or the database
    /// cannot be opened.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage_error)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(storage_error)?;
        let repo = Self::new(pool);
        repo.migrate().await?;
        info!(url, "sqlite database ready");
        Ok(repo)
    }

    /// A private in-memory database, gone once the repository is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the database cannot be opened.
    pub async fn in_memory() -> Result<Self, DomainError> {
        // Every connection to `:memory:` is a separate database, so the pool
        // holds exactly one and never recycles it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(storage_error)?;
        let repo = Self::new(pool);
        repo.migrate().await?;
        Ok(repo)
    }

    /// Creates the tables and indexes if they are missing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the DDL fails.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DomainError> {
        self.pool.begin().await.map_err(storage_error)
    }
}

async fn insert_all(
    tx: &mut Transaction<'static, Sqlite>,
    events: &[StoredEvent],
) -> Result<(), DomainError> {
    for event in events {
        let payload = serde_json::to_string(&event.payload).map_err(storage_error)?;
        sqlx::query(&format!(
            "INSERT INTO match_events ({EVENT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)"
        ))
        .bind(event.event_id.to_string())
        .bind(event.match_id.to_string())
        .bind(&event.event_type)
        .bind(payload)
        .bind(event.sequence_number)
        .bind(event.recorded_at)
        .execute(&mut **tx)
        .await
        .map_err(storage_error)?;
    }
    Ok(())
}

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn load_events(&self, match_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM match_events WHERE match_id = ? ORDER BY sequence_number"
        ))
        .bind(match_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        rows.iter().map(event_from_row).collect()
    }

    async fn load_event(&self, event_id: Uuid) -> Result<Option<StoredEvent>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM match_events WHERE event_id = ?"
        ))
        .bind(event_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.as_ref().map(event_from_row).transpose()
    }

    async fn insert_events(&self, events: &[StoredEvent]) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        insert_all(&mut tx, events).await?;
        tx.commit().await.map_err(storage_error)?;
        debug!(count = events.len(), "events inserted");
        Ok(())
    }

    async fn update_event(
        &self,
        event_id: Uuid,
        payload: &serde_json::Value,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_string(payload).map_err(storage_error)?;
        let result = sqlx::query("UPDATE match_events SET payload = ? WHERE event_id = ?")
            .bind(payload)
            .bind(event_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(event_id));
        }
        Ok(())
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM match_events WHERE event_id = ?")
            .bind(event_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(event_id));
        }
        Ok(())
    }

    async fn replace_events(
        &self,
        match_id: Uuid,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query("DELETE FROM match_events WHERE match_id = ?")
            .bind(match_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        insert_all(&mut tx, events).await?;
        tx.commit().await.map_err(storage_error)?;
        debug!(%match_id, count = events.len(), "event log replaced");
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for SqliteRepository {
    async fn insert_match(&self, record: &MatchRecord) -> Result<(), DomainError> {
        sqlx::query(&format!(
            "INSERT INTO matches ({MATCH_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(record.match_id.to_string())
        .bind(&record.home_team)
        .bind(&record.away_team)
        .bind(record.match_date)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn load_match(&self, match_id: Uuid) -> Result<Option<MatchRecord>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE match_id = ?"
        ))
        .bind(match_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.as_ref().map(match_from_row).transpose()
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        rows.iter().map(match_from_row).collect()
    }

    async fn update_match(&self, record: &MatchRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE matches SET home_team = ?, away_team = ?, match_date = ?, status = ?, \
             updated_at = ? WHERE match_id = ?",
        )
        .bind(&record.home_team)
        .bind(&record.away_team)
        .bind(record.match_date)
        .bind(record.status.as_str())
        .bind(record.updated_at)
        .bind(record.match_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::MatchNotFound(record.match_id));
        }
        Ok(())
    }

    async fn delete_match(&self, match_id: Uuid) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query("DELETE FROM match_events WHERE match_id = ?")
            .bind(match_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        let result = sqlx::query("DELETE FROM matches WHERE match_id = ?")
            .bind(match_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::MatchNotFound(match_id));
        }
        tx.commit().await.map_err(storage_error)?;
        Ok(())
    }
}
