//! RecordStore trait — persistence for day records.
//!
//! Records are keyed by (subject, day key). The day key is the canonical
//! `YYYYMMDD` string, so lexicographic ordering is chronological ordering
//! and range queries are plain string comparisons.
//!
//! Implementations: SQLite (production) and in-memory (tests/ephemeral),
//! both in `daybook-store`.

use crate::error::StoreError;
use crate::record::DayRecord;
use async_trait::async_trait;

/// The core RecordStore trait.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Return the record for (subject, day key), creating and persisting
    /// an empty one if none exists.
    ///
    /// Safe under concurrent calls for the same key: creation is
    /// conditional, and a loser of the race re-reads the winner's record
    /// instead of installing a divergent copy.
    async fn get_or_create(
        &self,
        subject: &str,
        day_key: &str,
    ) -> std::result::Result<DayRecord, StoreError>;

    /// Unconditionally overwrite the stored record for its key with the
    /// given record (last-writer-wins). Returns the written record.
    async fn replace(&self, record: DayRecord) -> std::result::Result<DayRecord, StoreError>;

    /// Return all records for the subject with `day_key >= start_key`
    /// and, if given, `day_key <= end_key`, ascending by day key.
    /// An empty or inverted range yields an empty vec, not an error.
    async fn range_query(
        &self,
        subject: &str,
        start_key: &str,
        end_key: Option<&str>,
    ) -> std::result::Result<Vec<DayRecord>, StoreError>;
}
