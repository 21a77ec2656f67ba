//! The fixed tool catalog for daybook.
//!
//! Two operations, exposed to the model on every round:
//! - `update_record` — mutate today's day log
//! - `query_history` — range-query past day logs
//!
//! Schemas are static; both tools share the record store behind an Arc.

pub mod applier;
pub mod query_history;
pub mod update_record;

use daybook_core::store::RecordStore;
use daybook_core::tool::ToolRegistry;
use std::sync::Arc;

pub use applier::{Applied, NO_FIELDS_UPDATED, apply};
pub use query_history::QueryHistoryTool;
pub use update_record::UpdateRecordTool;

/// Create the standard registry holding both catalog tools.
pub fn default_registry(store: Arc<dyn RecordStore>, subject: impl Into<String>) -> ToolRegistry {
    let subject = subject.into();
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(UpdateRecordTool::new(store.clone(), subject.clone())));
    registry.register(Box::new(QueryHistoryTool::new(store, subject)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_store::InMemoryStore;

    #[test]
    fn registry_contains_both_tools() {
        let store = Arc::new(InMemoryStore::new());
        let registry = default_registry(store, "Aria");
        assert!(registry.get("update_record").is_some());
        assert!(registry.get("query_history").is_some());
        assert_eq!(registry.definitions().len(), 2);
    }
}
