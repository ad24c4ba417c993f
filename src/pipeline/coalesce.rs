//! Flattening heterogeneous payloads into plain text.

use crate::core::Payload;

/// Default recursion limit for nested sequences.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for [`Coalescer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalesceConfig {
    /// Deepest nesting level that is still flattened. Anything below it
    /// contributes empty text.
    pub max_depth: usize,
}

impl Default for CoalesceConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Turns any [`Payload`] into a single string.
///
/// Total and pure: it never fails, and inputs nested deeper than the
/// configured limit yield a partial result rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coalescer {
    config: CoalesceConfig,
}

impl Coalescer {
    /// Creates a coalescer with the given limits.
    #[must_use]
    pub const fn new(config: CoalesceConfig) -> Self {
        Self { config }
    }

    /// Flattens `value`.
    ///
    /// - empty values (null, `""`, `[]`, `{}`, `0`, `false`) give `""`
    /// - text is returned as-is
    /// - mapping values are rendered and joined with single spaces, in key order
    /// - sequence elements are coalesced recursively and joined with single spaces
    /// - other scalars use their string form
    #[must_use]
    pub fn coalesce(&self, value: &Payload) -> String {
        self.coalesce_at(value, 0)
    }

    fn coalesce_at(&self, value: &Payload, depth: usize) -> String {
        if depth > self.config.max_depth || value.is_empty() {
            return String::new();
        }

        match value {
            Payload::Text(s) => s.clone(),
            Payload::Map(map) => map
                .values()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            Payload::List(items) => items
                .iter()
                .map(|item| self.coalesce_at(item, depth + 1))
                .collect::<Vec<_>>()
                .join(" "),
            other => other.to_string(),
        }
    }
}

/// Flattens `value` with the default depth limit.
///
/// # Examples
///
/// ```
/// use healthfaq::core::Payload;
/// use healthfaq::pipeline::coalesce;
///
/// let value = Payload::from(vec!["Take", "with food"]);
/// assert_eq!(coalesce(&value), "Take with food");
/// ```
#[must_use]
pub fn coalesce(value: &Payload) -> String {
    Coalescer::default().coalesce(value)
}
