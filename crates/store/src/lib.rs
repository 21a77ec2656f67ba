//! Record store implementations for daybook.

pub mod in_memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
