//! query_history tool — range queries over past day logs.
//!
//! Takes a required `start_key` and optional `end_key`, both `YYYYMMDD`.
//! Neither is validated as a well-formed date and the range may be
//! inverted; such queries simply match nothing. A store failure degrades
//! to an error string in the tool result so the turn keeps progressing.

use async_trait::async_trait;
use daybook_core::error::ToolError;
use daybook_core::format::format_range;
use daybook_core::store::RecordStore;
use daybook_core::tool::{Tool, ToolResult};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct QueryHistoryTool {
    store: Arc<dyn RecordStore>,
    subject: String,
}

impl QueryHistoryTool {
    pub fn new(store: Arc<dyn RecordStore>, subject: impl Into<String>) -> Self {
        Self {
            store,
            subject: subject.into(),
        }
    }
}

#[async_trait]
impl Tool for QueryHistoryTool {
    fn name(&self) -> &str {
        "query_history"
    }

    fn description(&self) -> &str {
        "Retrieve past day logs for a date range. Dates are YYYYMMDD strings; \
         omit end_key to fetch everything from start_key onward."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "start_key": {
                    "type": "string",
                    "description": "First day to include, YYYYMMDD"
                },
                "end_key": {
                    "type": "string",
                    "description": "Last day to include, YYYYMMDD (optional)"
                }
            },
            "required": ["start_key"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let start_key = arguments["start_key"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'start_key' argument".into()))?;
        let end_key = arguments["end_key"].as_str();

        match self
            .store
            .range_query(&self.subject, start_key, end_key)
            .await
        {
            Ok(records) => {
                debug!(
                    start_key,
                    end_key = end_key.unwrap_or("<open>"),
                    count = records.len(),
                    "History query"
                );
                Ok(ToolResult::ok(format_range(&records)))
            }
            Err(e) => {
                warn!(error = %e, "History query failed; degrading to error text");
                Ok(ToolResult::failure(
                    "Error retrieving data for the requested range.",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::format::NO_DATA_FOUND;
    use daybook_store::InMemoryStore;

    async fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        for (key, wake) in [("20250101", "7:00 AM"), ("20250104", "6:45 AM")] {
            let mut record = store.get_or_create("Aria", key).await.unwrap();
            record.wake_up = Some(wake.into());
            store.replace(record).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn query_formats_matching_days() {
        let tool = QueryHistoryTool::new(seeded_store().await, "Aria");
        let result = tool
            .execute(serde_json::json!({"start_key": "20250101", "end_key": "20250107"}))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("January 1, 2025"));
        assert!(result.output.contains("January 4, 2025"));
        assert!(result.output.contains("Wake up: 7:00 AM"));
    }

    #[tokio::test]
    async fn no_matches_returns_fixed_message() {
        let tool = QueryHistoryTool::new(seeded_store().await, "Aria");
        let result = tool
            .execute(serde_json::json!({"start_key": "20260101"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, NO_DATA_FOUND);
    }

    #[tokio::test]
    async fn inverted_range_matches_nothing() {
        let tool = QueryHistoryTool::new(seeded_store().await, "Aria");
        let result = tool
            .execute(serde_json::json!({"start_key": "20250107", "end_key": "20250101"}))
            .await
            .unwrap();

        assert_eq!(result.output, NO_DATA_FOUND);
    }

    #[tokio::test]
    async fn missing_start_key_is_invalid() {
        let tool = QueryHistoryTool::new(seeded_store().await, "Aria");
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
