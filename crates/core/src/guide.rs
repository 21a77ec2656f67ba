//! GuideSource trait — provider of the static reference document.
//!
//! The guide is a large text blob (the domain reference the assistant
//! answers knowledge questions from) produced by an external extraction
//! pipeline. This core only consumes it, read-only, and caches it
//! process-wide (see `daybook_agent::GuideCache`).

use crate::error::GuideError;
use async_trait::async_trait;

/// A source of the reference guide text. Idempotent and cacheable.
#[async_trait]
pub trait GuideSource: Send + Sync {
    /// Fetch the full guide text.
    async fn text(&self) -> std::result::Result<String, GuideError>;
}
