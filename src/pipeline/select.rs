//! Choosing which session buffers feed the FAQ generator.

use crate::core::{BufferStore, FeatureArea, is_reserved};
use tracing::debug;

/// Minimum trimmed length for a preferred buffer of the area.
pub const DEFAULT_AREA_MIN_CHARS: usize = 60;

/// Minimum trimmed length for any buffer during the fallback scan.
pub const DEFAULT_FALLBACK_MIN_CHARS: usize = 120;

/// Minimum length of the joined result.
pub const DEFAULT_RESULT_MIN_CHARS: usize = 120;

/// Length thresholds for [`ContextSelector`], in characters.
///
/// Every comparison is strict: a text qualifies only when it is longer
/// than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Threshold for the area's preferred buffers.
    pub area_min_chars: usize,
    /// Threshold for buffers found by the fallback scan.
    pub fallback_min_chars: usize,
    /// Threshold for the final joined context.
    pub result_min_chars: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            area_min_chars: DEFAULT_AREA_MIN_CHARS,
            fallback_min_chars: DEFAULT_FALLBACK_MIN_CHARS,
            result_min_chars: DEFAULT_RESULT_MIN_CHARS,
        }
    }
}

/// Picks FAQ source text out of a buffer store.
#[derive(Debug)]
pub struct ContextSelector<'a, S: BufferStore + ?Sized> {
    store: &'a S,
    config: SelectionConfig,
}

impl<'a, S: BufferStore + ?Sized> ContextSelector<'a, S> {
    /// Creates a selector with default thresholds.
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, SelectionConfig::default())
    }

    /// Creates a selector with custom thresholds.
    pub const fn with_config(store: &'a S, config: SelectionConfig) -> Self {
        Self { store, config }
    }

    /// Returns the context for `area`, or `""` when nothing qualifies.
    ///
    /// The area's preferred buffers are tried first, in table order. Only if
    /// none of them is long enough does the selector scan every buffer
    /// (identity keys excluded) with the stricter fallback threshold.
    #[must_use]
    pub fn select(&self, area: FeatureArea) -> String {
        let mut parts: Vec<&str> = area
            .preferred_buffers()
            .iter()
            .filter_map(|name| self.store.get(name))
            .map(str::trim)
            .filter(|text| longer_than(text, self.config.area_min_chars))
            .collect();

        if parts.is_empty() {
            debug!(area = %area, "no preferred buffer qualified, scanning all buffers");
            parts = self
                .store
                .entries()
                .into_iter()
                .filter(|(name, _)| !is_reserved(name))
                .map(|(_, text)| text.trim())
                .filter(|text| longer_than(text, self.config.fallback_min_chars))
                .collect();
        }

        let joined = parts.join(" ");
        let text = joined.trim();
        if longer_than(text, self.config.result_min_chars) {
            debug!(area = %area, parts = parts.len(), "selected context");
            text.to_string()
        } else {
            debug!(area = %area, "context too short");
            String::new()
        }
    }
}

/// Selects context for `area` with default thresholds.
#[must_use]
pub fn select_context<S: BufferStore + ?Sized>(store: &S, area: FeatureArea) -> String {
    ContextSelector::new(store).select(area)
}

fn longer_than(text: &str, min_chars: usize) -> bool {
    text.chars().count() > min_chars
}
