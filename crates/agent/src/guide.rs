//! Process-wide cache for the reference guide text.
//!
//! The guide is large and immutable for the lifetime of the process, so
//! it is loaded at most once. Concurrent first reads are serialized
//! through a load gate; every read after that is a cheap lock-free-ish
//! clone of an `Arc<String>`.

use daybook_core::error::GuideError;
use daybook_core::guide::GuideSource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Text substituted when the guide cannot be loaded. The turn still
/// proceeds; the assistant just has no reference material to draw on.
pub const GUIDE_PLACEHOLDER: &str = "Reference guide unavailable.";

/// A `GuideSource` backed by a file on disk.
pub struct FileGuideSource {
    path: PathBuf,
}

impl FileGuideSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl GuideSource for FileGuideSource {
    async fn text(&self) -> std::result::Result<String, GuideError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GuideError::Unavailable(format!("{}: {e}", self.path.display())))
    }
}

/// Lazily-initialized, shareable cache over a `GuideSource`.
///
/// First access loads from the source; a load failure caches the
/// placeholder instead of erroring, so one bad read never takes the
/// assistant down.
pub struct GuideCache {
    source: Arc<dyn GuideSource>,
    cached: RwLock<Option<Arc<String>>>,
    load_gate: Mutex<()>,
}

impl GuideCache {
    pub fn new(source: Arc<dyn GuideSource>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
            load_gate: Mutex::new(()),
        }
    }

    /// Get the guide text, loading it on first use.
    pub async fn text(&self) -> Arc<String> {
        // Fast path: already loaded.
        if let Some(text) = self.cached.read().await.as_ref() {
            return text.clone();
        }

        // Slow path: serialize loaders so the source is hit once.
        let _gate = self.load_gate.lock().await;

        // Another task may have finished loading while we waited.
        if let Some(text) = self.cached.read().await.as_ref() {
            return text.clone();
        }

        let text = match self.source.text().await {
            Ok(text) => {
                debug!(bytes = text.len(), "Loaded reference guide");
                Arc::new(text)
            }
            Err(e) => {
                warn!(error = %e, "Guide load failed; caching placeholder");
                Arc::new(GUIDE_PLACEHOLDER.to_string())
            }
        };

        *self.cached.write().await = Some(text.clone());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl GuideSource for CountingSource {
        async fn text(&self) -> std::result::Result<String, GuideError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(GuideError::Unavailable("no such file".into()))
            } else {
                Ok("guide body".into())
            }
        }
    }

    #[tokio::test]
    async fn loads_once_and_caches() {
        let source = Arc::new(CountingSource {
            loads: AtomicUsize::new(0),
            fail: false,
        });
        let cache = GuideCache::new(source.clone());

        assert_eq!(cache.text().await.as_str(), "guide body");
        assert_eq!(cache.text().await.as_str(), "guide body");
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_caches_placeholder() {
        let source = Arc::new(CountingSource {
            loads: AtomicUsize::new(0),
            fail: true,
        });
        let cache = GuideCache::new(source.clone());

        assert_eq!(cache.text().await.as_str(), GUIDE_PLACEHOLDER);
        // The placeholder is cached; the source is not retried.
        assert_eq!(cache.text().await.as_str(), GUIDE_PLACEHOLDER);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_reads_load_once() {
        let source = Arc::new(CountingSource {
            loads: AtomicUsize::new(0),
            fail: false,
        });
        let cache = Arc::new(GuideCache::new(source.clone()));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.text().await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap().as_str(), "guide body");
        }
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn file_source_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.md");
        std::fs::write(&path, "on-disk guide").unwrap();

        let source = FileGuideSource::new(&path);
        assert_eq!(source.text().await.unwrap(), "on-disk guide");

        let missing = FileGuideSource::new(dir.path().join("nope.md"));
        assert!(missing.text().await.is_err());
    }
}
