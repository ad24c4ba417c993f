//! Content buffers.
//!
//! A buffer is a named slot of free text written by a feature area when one
//! of its actions completes. Later writes under the same name overwrite the
//! earlier text.

use super::area::FeatureArea;
use crate::io::unicode::truncate_graphemes;
use serde::{Deserialize, Serialize};

/// A named slot of session-scoped text.
///
/// # Examples
///
/// ```
/// use healthfaq::core::{ContentBuffer, FeatureArea};
///
/// let buffer = ContentBuffer::new("report_summary", Some(FeatureArea::Report), "All values normal.");
/// assert_eq!(buffer.char_count(), 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBuffer {
    /// Unique identifier (assigned by storage layer).
    pub id: Option<i64>,

    /// Buffer name (the lookup key).
    pub name: String,

    /// Owning feature area, if any.
    pub area: Option<FeatureArea>,

    /// Buffer text.
    pub text: String,

    /// Buffer metadata.
    pub metadata: BufferMetadata,
}

/// Metadata associated with a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BufferMetadata {
    /// Unix timestamp when the buffer was first written.
    pub created_at: i64,

    /// Unix timestamp of the latest overwrite.
    pub updated_at: i64,

    /// Text size in bytes.
    pub size: usize,
}

impl ContentBuffer {
    /// Creates a new buffer stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, area: Option<FeatureArea>, text: impl Into<String>) -> Self {
        let text = text.into();
        let now = current_timestamp();
        Self {
            id: None,
            name: name.into(),
            area,
            metadata: BufferMetadata {
                created_at: now,
                updated_at: now,
                size: text.len(),
            },
            text,
        }
    }

    /// Replaces the text (and owner), keeping identity and creation time.
    pub fn overwrite(&mut self, area: Option<FeatureArea>, text: String) {
        self.metadata.size = text.len();
        self.metadata.updated_at = current_timestamp();
        self.area = area;
        self.text = text;
    }

    /// Returns the size of the text in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.text.len()
    }

    /// Returns the number of characters in the trimmed text.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.trim().chars().count()
    }

    /// Returns a preview of at most `len` grapheme clusters.
    #[must_use]
    pub fn peek(&self, len: usize) -> &str {
        truncate_graphemes(&self.text, len)
    }
}

/// Returns the current Unix timestamp in seconds.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
