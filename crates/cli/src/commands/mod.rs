//! CLI command implementations.

pub mod chat;
pub mod history;
pub mod onboard;
pub mod today;

use daybook_config::AppConfig;
use daybook_core::store::RecordStore;
use daybook_store::{InMemoryStore, SqliteStore};
use std::sync::Arc;

/// Open the record store named by the config.
pub(crate) async fn open_store(
    config: &AppConfig,
) -> Result<Arc<dyn RecordStore>, Box<dyn std::error::Error>> {
    match config.store.backend.as_str() {
        "in_memory" => Ok(Arc::new(InMemoryStore::new())),
        _ => {
            let path = config.store.sqlite_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let store = SqliteStore::new(&path.to_string_lossy()).await?;
            Ok(Arc::new(store))
        }
    }
}
