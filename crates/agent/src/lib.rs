//! Conversation orchestration for daybook.
//!
//! Wires the provider, tool catalog, record store, and reference guide
//! into a turn loop that converts free-text utterances into record
//! mutations, history lookups, and a natural-language reply.

pub mod guide;
pub mod orchestrator;

pub use guide::{FileGuideSource, GuideCache, GUIDE_PLACEHOLDER};
pub use orchestrator::{DayLogAgent, TurnOutcome, NOT_CONFIGURED_TEXT};
