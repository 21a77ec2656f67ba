//! In-memory record store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use daybook_core::error::StoreError;
use daybook_core::record::DayRecord;
use daybook_core::store::RecordStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory store keyed by (subject, day_key).
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<(String, String), DayRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records (test helper).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty (test helper).
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get_or_create(
        &self,
        subject: &str,
        day_key: &str,
    ) -> Result<DayRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .entry((subject.to_string(), day_key.to_string()))
            .or_insert_with(|| DayRecord::empty(subject, day_key));
        Ok(record.clone())
    }

    async fn replace(&self, record: DayRecord) -> Result<DayRecord, StoreError> {
        let mut records = self.records.write().await;
        records.insert(
            (record.subject.clone(), record.day_key.clone()),
            record.clone(),
        );
        Ok(record)
    }

    async fn range_query(
        &self,
        subject: &str,
        start_key: &str,
        end_key: Option<&str>,
    ) -> Result<Vec<DayRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matches: Vec<DayRecord> = records
            .values()
            .filter(|r| {
                r.subject == subject
                    && r.day_key.as_str() >= start_key
                    && end_key.is_none_or(|end| r.day_key.as_str() <= end)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.day_key.cmp(&b.day_key));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_then_replace() {
        let store = InMemoryStore::new();
        let mut record = store.get_or_create("Aria", "20250101").await.unwrap();
        assert!(record.wake_up.is_none());

        record.wake_up = Some("7:00 AM".into());
        store.replace(record).await.unwrap();

        let fetched = store.get_or_create("Aria", "20250101").await.unwrap();
        assert_eq!(fetched.wake_up.as_deref(), Some("7:00 AM"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn range_query_filters_and_sorts() {
        let store = InMemoryStore::new();
        for key in ["20250105", "20250101", "20250110"] {
            store.get_or_create("Aria", key).await.unwrap();
        }

        let records = store
            .range_query("Aria", "20250101", Some("20250105"))
            .await
            .unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r.day_key.as_str()).collect();
        assert_eq!(keys, vec!["20250101", "20250105"]);
    }

    #[tokio::test]
    async fn range_query_no_matches_is_empty() {
        let store = InMemoryStore::new();
        let records = store.range_query("Aria", "20250101", None).await.unwrap();
        assert!(records.is_empty());
    }
}
