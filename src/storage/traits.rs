//! Storage trait definition.
//!
//! Defines the interface for persisting a session between CLI invocations:
//! identity, buffers and FAQ history.

use crate::core::{ContentBuffer, FeatureArea, Identity, QaPair, Session};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for persistent session storage.
pub trait Storage {
    /// Initializes storage (creates schema).
    ///
    /// Should be idempotent - safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails or the database was
    /// written by an incompatible version.
    fn init(&mut self) -> Result<()>;

    /// Checks if storage is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    /// Deletes identity, buffers and history but preserves the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn reset(&mut self) -> Result<()>;

    // ==================== Identity Operations ====================

    /// Loads the session identity, logged out if none was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if database read or deserialization fails.
    fn load_identity(&self) -> Result<Identity>;

    /// Saves the session identity.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or database write fails.
    fn save_identity(&mut self, identity: &Identity) -> Result<()>;

    // ==================== Buffer Operations ====================

    /// Writes a buffer, overwriting any earlier text under `name`.
    ///
    /// Returns the buffer ID, which is stable across overwrites.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::StorageError::ReservedName`] for identity
    /// keys, or a database error.
    fn put_buffer(&mut self, name: &str, area: Option<FeatureArea>, text: &str) -> Result<i64>;

    /// Retrieves a buffer by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_buffer(&self, name: &str) -> Result<Option<ContentBuffer>>;

    /// Lists all buffers in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_buffers(&self) -> Result<Vec<ContentBuffer>>;

    /// Deletes every buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn clear_buffers(&mut self) -> Result<()>;

    /// Returns the number of buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn buffer_count(&self) -> Result<usize>;

    // ==================== Session Operations ====================

    /// Snapshots identity and buffers into an in-memory [`Session`].
    ///
    /// # Errors
    ///
    /// Returns an error if either part cannot be loaded.
    fn load_session(&self) -> Result<Session> {
        Ok(Session::from_parts(
            self.load_identity()?,
            self.list_buffers()?,
        ))
    }

    /// Logs out: clears identity and every buffer.
    ///
    /// Implementations backed by a database should apply both writes
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    fn logout(&mut self) -> Result<()> {
        self.save_identity(&Identity::default())?;
        self.clear_buffers()
    }

    // ==================== History Operations ====================

    /// Appends a FAQ run to the history. Returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or insertion fails.
    fn record_faqs(&mut self, record: &FaqRecord) -> Result<i64>;

    /// Lists the most recent FAQ runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or deserialization fails.
    fn list_history(&self, limit: usize) -> Result<Vec<FaqRecord>>;

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<StorageStats>;
}

/// Where the text behind a FAQ run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqSource {
    /// Content passed explicitly by the caller.
    Explicit,
    /// Content picked from session buffers.
    Selected,
}

impl FaqSource {
    /// Lowercase name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Selected => "selected",
        }
    }
}

impl fmt::Display for FaqSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted FAQ run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    /// Row ID (assigned by storage).
    pub id: Option<i64>,
    /// Area used for selection, if any.
    pub area: Option<FeatureArea>,
    /// Content source.
    pub source: FaqSource,
    /// Outcome label (`parsed`, `content_fallback`, `service_failure`).
    pub outcome: String,
    /// Outcome detail.
    pub detail: String,
    /// Pairs shown to the user.
    pub pairs: Vec<QaPair>,
    /// Unix timestamp.
    pub created_at: i64,
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of buffers stored.
    pub buffer_count: usize,
    /// Total size of all buffer content in bytes.
    pub total_content_size: usize,
    /// Number of recorded FAQ runs.
    pub history_count: usize,
    /// Whether a user is logged in.
    pub logged_in: bool,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
