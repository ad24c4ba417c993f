//! Storage layer for healthfaq.
//!
//! Persists the session (identity, buffers) and FAQ history in `SQLite` so
//! that separate CLI invocations share one session.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use sqlite::SqliteStorage;
pub use traits::{FaqRecord, FaqSource, Storage, StorageStats};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".healthfaq/session.db";
