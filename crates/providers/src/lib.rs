//! LLM provider implementations for daybook.
//!
//! All providers implement the `daybook_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
