//! update_record tool — the model's only way to mutate today's log.
//!
//! Arguments are an object whose keys are record field names and whose
//! values are strings; any subset is valid, including the empty object.
//! Validation and merge semantics live in the applier; this tool owns
//! the read-apply-write cycle: get or create today's record, apply every
//! accepted pair to one copy, then perform exactly one store write (or
//! none, when nothing was accepted).

use crate::applier;
use async_trait::async_trait;
use daybook_core::error::ToolError;
use daybook_core::record::{SLOTS, local_day_key};
use daybook_core::store::RecordStore;
use daybook_core::tool::{Tool, ToolResult};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct UpdateRecordTool {
    store: Arc<dyn RecordStore>,
    subject: String,
}

impl UpdateRecordTool {
    pub fn new(store: Arc<dyn RecordStore>, subject: impl Into<String>) -> Self {
        Self {
            store,
            subject: subject.into(),
        }
    }

    /// Flatten the argument object into ordered (field, value) pairs.
    /// Non-string values are skipped with a warning, like unknown fields.
    fn to_pairs(arguments: &serde_json::Value) -> Result<Vec<(String, String)>, ToolError> {
        let object = arguments
            .as_object()
            .ok_or_else(|| ToolError::InvalidArguments("expected a JSON object".into()))?;

        let mut pairs = Vec::with_capacity(object.len());
        for (name, value) in object {
            match value.as_str() {
                Some(s) => pairs.push((name.clone(), s.to_string())),
                None => warn!(field = %name, "Skipping non-string field value"),
            }
        }
        Ok(pairs)
    }
}

#[async_trait]
impl Tool for UpdateRecordTool {
    fn name(&self) -> &str {
        "update_record"
    }

    fn description(&self) -> &str {
        "Update one or more fields of today's day log. Pass only the fields you want to set; \
         Notes accumulates entries rather than replacing them."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        for accessor in SLOTS {
            properties.insert(
                accessor.name.to_string(),
                serde_json::json!({ "type": "string" }),
            );
        }
        // Unknown keys are handled per-key by the applier, so the schema
        // stays permissive; a strict endpoint must not reject the whole
        // call over one stray field.
        serde_json::json!({
            "type": "object",
            "properties": properties
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let pairs = Self::to_pairs(&arguments)?;
        let day_key = local_day_key();

        let record = self
            .store
            .get_or_create(&self.subject, &day_key)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "update_record".into(),
                reason: e.to_string(),
            })?;

        let applied = applier::apply(&record, &pairs);

        if applied.accepted == 0 {
            return Ok(ToolResult::ok(applied.summary));
        }

        // One atomic write for the whole batch. If it fails, the stored
        // record is untouched and no partial update is visible.
        self.store
            .replace(applied.record)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "update_record".into(),
                reason: e.to_string(),
            })?;

        debug!(day_key = %day_key, accepted = applied.accepted, "Updated day record");
        Ok(ToolResult::ok(applied.summary))
    }
}
