//! SQLite record store backend.
//!
//! One table, `day_records`, keyed by (subject, day_key). Slot values are
//! stored as a JSON document in the `fields` column; range queries lean on
//! the `YYYYMMDD` day key being string-sortable, so `day_key >= ?` in SQL
//! is a chronological comparison.

use async_trait::async_trait;
use chrono::Utc;
use daybook_core::error::StoreError;
use daybook_core::record::DayRecord;
use daybook_core::store::RecordStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// A SQLite-backed record store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store from a file path.
    ///
    /// The database and table are created automatically. Pass
    /// `"sqlite::memory:"` for an in-process ephemeral database
    /// (useful for tests).
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StoreError::Unavailable(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite record store initialized at {path}");
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS day_records (
                subject    TEXT NOT NULL,
                day_key    TEXT NOT NULL,
                fields     TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (subject, day_key)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("day_records table: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<DayRecord, StoreError> {
        let fields: String = row
            .try_get("fields")
            .map_err(|e| StoreError::QueryFailed(format!("fields column: {e}")))?;
        serde_json::from_str(&fields)
            .map_err(|e| StoreError::Serialization(format!("fields JSON: {e}")))
    }

    fn record_to_json(record: &DayRecord) -> Result<String, StoreError> {
        serde_json::to_string(record)
            .map_err(|e| StoreError::Serialization(format!("record JSON: {e}")))
    }

    async fn fetch(&self, subject: &str, day_key: &str) -> Result<Option<DayRecord>, StoreError> {
        let row = sqlx::query("SELECT fields FROM day_records WHERE subject = ?1 AND day_key = ?2")
            .bind(subject)
            .bind(day_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("SELECT: {e}")))?;

        match row {
            Some(ref r) => Ok(Some(Self::row_to_record(r)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get_or_create(
        &self,
        subject: &str,
        day_key: &str,
    ) -> Result<DayRecord, StoreError> {
        let empty = DayRecord::empty(subject, day_key);
        let fields = Self::record_to_json(&empty)?;
        let now = Utc::now().to_rfc3339();

        // Conditional create: a concurrent creator that loses this race
        // changes zero rows, and the re-read below picks up the winner's
        // record instead of a divergent local copy.
        sqlx::query(
            r#"
            INSERT INTO day_records (subject, day_key, fields, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(subject, day_key) DO NOTHING
            "#,
        )
        .bind(subject)
        .bind(day_key)
        .bind(&fields)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(format!("INSERT failed: {e}")))?;

        self.fetch(subject, day_key).await?.ok_or_else(|| {
            StoreError::QueryFailed(format!("record vanished after create: {subject}/{day_key}"))
        })
    }

    async fn replace(&self, record: DayRecord) -> Result<DayRecord, StoreError> {
        let fields = Self::record_to_json(&record)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO day_records (subject, day_key, fields, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(subject, day_key) DO UPDATE SET
                fields = excluded.fields,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.subject)
        .bind(&record.day_key)
        .bind(&fields)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(format!("REPLACE failed: {e}")))?;

        debug!(subject = %record.subject, day_key = %record.day_key, "Replaced day record");
        Ok(record)
    }

    async fn range_query(
        &self,
        subject: &str,
        start_key: &str,
        end_key: Option<&str>,
    ) -> Result<Vec<DayRecord>, StoreError> {
        let rows = match end_key {
            Some(end) => {
                sqlx::query(
                    r#"
                    SELECT fields FROM day_records
                    WHERE subject = ?1 AND day_key >= ?2 AND day_key <= ?3
                    ORDER BY day_key ASC
                    "#,
                )
                .bind(subject)
                .bind(start_key)
                .bind(end)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT fields FROM day_records
                    WHERE subject = ?1 AND day_key >= ?2
                    ORDER BY day_key ASC
                    "#,
                )
                .bind(subject)
                .bind(start_key)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StoreError::QueryFailed(format!("range query: {e}")))?;

        rows.iter().map(Self::row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn get_or_create_synthesizes_empty_record() {
        let store = test_store().await;
        let record = store.get_or_create("Aria", "20250101").await.unwrap();
        assert_eq!(record.subject, "Aria");
        assert_eq!(record.day_key, "20250101");
        assert!(record.wake_up.is_none());
        assert!(record.notes.is_none());
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = test_store().await;
        let mut record = store.get_or_create("Aria", "20250101").await.unwrap();
        record.wake_up = Some("7:00 AM".into());
        store.replace(record).await.unwrap();

        // Second call must return the stored record, not a fresh empty one
        let again = store.get_or_create("Aria", "20250101").await.unwrap();
        assert_eq!(again.wake_up.as_deref(), Some("7:00 AM"));
    }

    #[tokio::test]
    async fn replace_overwrites_whole_record() {
        let store = test_store().await;
        let mut record = store.get_or_create("Aria", "20250101").await.unwrap();
        record.wake_up = Some("7:00 AM".into());
        record.feed = Some("6:45 PM".into());
        store.replace(record.clone()).await.unwrap();

        record.feed = None;
        let written = store.replace(record).await.unwrap();
        assert!(written.feed.is_none());

        let fetched = store.get_or_create("Aria", "20250101").await.unwrap();
        assert_eq!(fetched.wake_up.as_deref(), Some("7:00 AM"));
        assert!(fetched.feed.is_none());
    }

    #[tokio::test]
    async fn range_query_is_closed_and_ascending() {
        let store = test_store().await;
        for key in ["20250103", "20250101", "20250107", "20250110"] {
            let mut record = store.get_or_create("Aria", key).await.unwrap();
            record.wake_up = Some("7:00 AM".into());
            store.replace(record).await.unwrap();
        }

        let records = store
            .range_query("Aria", "20250101", Some("20250107"))
            .await
            .unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r.day_key.as_str()).collect();
        assert_eq!(keys, vec!["20250101", "20250103", "20250107"]);
    }

    #[tokio::test]
    async fn range_query_open_ended() {
        let store = test_store().await;
        for key in ["20250101", "20250105"] {
            store.get_or_create("Aria", key).await.unwrap();
        }

        let records = store.range_query("Aria", "20250102", None).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].day_key, "20250105");
    }

    #[tokio::test]
    async fn range_query_empty_range_is_ok() {
        let store = test_store().await;
        store.get_or_create("Aria", "20250105").await.unwrap();

        // Inverted range matches nothing, not an error
        let records = store
            .range_query("Aria", "20250110", Some("20250101"))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn subjects_are_partitioned() {
        let store = test_store().await;
        store.get_or_create("Aria", "20250101").await.unwrap();
        store.get_or_create("Ben", "20250101").await.unwrap();

        let records = store.range_query("Aria", "20250101", None).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Aria");
    }

    #[tokio::test]
    async fn store_name() {
        let store = test_store().await;
        assert_eq!(store.name(), "sqlite");
    }
}
