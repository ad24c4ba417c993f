//! Recovering question/answer pairs from free-form backend output.
//!
//! Models are unreliable about returning bare JSON. [`ResponseCoercer`] runs
//! an ordered chain of [`ParseStrategy`] values, first success wins, and
//! falls back to pairs synthesized from the source content when every
//! strategy fails.

use super::coalesce::coalesce;
use super::faq::{FaqOutcome, FaqResult};
use crate::core::{Payload, QaPair};
use crate::io::{first_sentence, truncate_graphemes};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Length of the content snippet used in the fallback answer.
pub const DEFAULT_SNIPPET_GRAPHEMES: usize = 120;

/// Question of the content-derived fallback pair.
pub const FOCUS_QUESTION: &str = "What should I focus on from this report?";

/// Question of the consultation disclaimer pair.
pub const CONSULTATION_QUESTION: &str = "Do I need professional consultation?";

/// Answer of the consultation disclaimer pair.
pub const CONSULTATION_ANSWER: &str =
    "Yes. Always discuss these findings with a qualified healthcare provider.";

/// Why a parse strategy rejected the backend output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Text is not a JSON document.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// JSON parsed but is not an array.
    #[error("expected a JSON array")]
    NotAnArray,

    /// The array holds no pairs.
    #[error("JSON array is empty")]
    EmptyArray,

    /// An element is not an object with `question` and `answer` keys.
    #[error("element {index} is missing question/answer keys")]
    MissingKeys {
        /// Position of the offending element.
        index: usize,
    },

    /// No `[` ... `]` span was found.
    #[error("no bracketed array in response")]
    NoBrackets,

    /// Every parsed pair was blank after trimming.
    #[error("no displayable pairs")]
    NothingDisplayable,
}

/// One way of turning raw backend text into pairs.
pub trait ParseStrategy: Send + Sync {
    /// Short identifier used in logs and outcomes.
    fn name(&self) -> &'static str;

    /// Attempts to parse `raw`.
    ///
    /// # Errors
    ///
    /// Returns the reason the text was rejected.
    fn parse(&self, raw: &str) -> Result<Vec<QaPair>, ParseFailure>;
}

/// Parses the whole response as a JSON array of pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson;

impl ParseStrategy for StrictJson {
    fn name(&self) -> &'static str {
        "strict_json"
    }

    fn parse(&self, raw: &str) -> Result<Vec<QaPair>, ParseFailure> {
        parse_pair_array(raw)
    }
}

/// Parses the span from the first `[` to the last `]`, inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketExtraction;

impl ParseStrategy for BracketExtraction {
    fn name(&self) -> &'static str {
        "bracket_extraction"
    }

    fn parse(&self, raw: &str) -> Result<Vec<QaPair>, ParseFailure> {
        match (raw.find('['), raw.rfind(']')) {
            (Some(start), Some(end)) if start < end => parse_pair_array(&raw[start..=end]),
            _ => Err(ParseFailure::NoBrackets),
        }
    }
}

/// Parses `text` as a non-empty array of objects holding both keys.
///
/// Key presence is all that is checked; non-string values are flattened to
/// text and blank values pass through.
fn parse_pair_array(text: &str) -> Result<Vec<QaPair>, ParseFailure> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseFailure::InvalidJson(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ParseFailure::NotAnArray);
    };
    if items.is_empty() {
        return Err(ParseFailure::EmptyArray);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(mut obj) => {
                match (obj.remove("question"), obj.remove("answer")) {
                    (Some(q), Some(a)) => Ok(QaPair::new(field_text(q), field_text(a))),
                    _ => Err(ParseFailure::MissingKeys { index }),
                }
            }
            _ => Err(ParseFailure::MissingKeys { index }),
        })
        .collect()
}

fn field_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => coalesce(&Payload::from(other)),
    }
}

/// Runs the parse chain and applies the content-derived fallback.
pub struct ResponseCoercer {
    strategies: Vec<Box<dyn ParseStrategy>>,
    snippet_graphemes: usize,
}

impl Default for ResponseCoercer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCoercer {
    /// Creates the standard chain: strict parse, then bracket extraction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(StrictJson), Box::new(BracketExtraction)],
            snippet_graphemes: DEFAULT_SNIPPET_GRAPHEMES,
        }
    }

    /// Creates a coercer with a custom strategy chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use healthfaq::pipeline::{ParseStrategy, ResponseCoercer, StrictJson};
    ///
    /// let strategies: Vec<Box<dyn ParseStrategy>> = vec![Box::new(StrictJson)];
    /// let coercer = ResponseCoercer::with_strategies(strategies);
    /// assert_eq!(coercer.strategy_names(), vec!["strict_json"]);
    /// ```
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self {
            strategies,
            snippet_graphemes: DEFAULT_SNIPPET_GRAPHEMES,
        }
    }

    /// Sets the fallback snippet length.
    #[must_use]
    pub const fn with_snippet_graphemes(mut self, len: usize) -> Self {
        self.snippet_graphemes = len;
        self
    }

    /// Names of the strategies, in the order they run.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Runs the strategy chain only.
    ///
    /// # Errors
    ///
    /// Returns the failure of the last strategy when none succeeds.
    pub fn parse(&self, raw: &str) -> Result<(Vec<QaPair>, &'static str), ParseFailure> {
        let mut last = ParseFailure::NoBrackets;
        for strategy in &self.strategies {
            match strategy.parse(raw) {
                Ok(pairs) => {
                    debug!(strategy = strategy.name(), pairs = pairs.len(), "parsed FAQ response");
                    return Ok((pairs, strategy.name()));
                }
                Err(failure) => {
                    debug!(strategy = strategy.name(), %failure, "parse strategy rejected response");
                    last = failure;
                }
            }
        }
        Err(last)
    }

    /// Coerces `raw` into pairs, never failing.
    ///
    /// Parsed pairs are returned unmodified; blank values are left for the
    /// presentation filter. When parsing fails the result holds exactly the
    /// two content-derived fallback pairs.
    #[must_use]
    pub fn coerce(&self, raw: &str, original_content: &str) -> FaqResult {
        match self.parse(raw) {
            Ok((pairs, strategy)) => FaqResult {
                pairs,
                outcome: FaqOutcome::Parsed { strategy },
            },
            Err(failure) => {
                warn!(%failure, "FAQ response unparseable, using content fallback");
                self.content_fallback(original_content, failure)
            }
        }
    }

    /// Builds the two content-derived fallback pairs.
    #[must_use]
    pub fn content_fallback(&self, original_content: &str, failure: ParseFailure) -> FaqResult {
        let snippet = truncate_graphemes(first_sentence(original_content), self.snippet_graphemes);
        FaqResult {
            pairs: vec![
                QaPair::new(FOCUS_QUESTION, format!("{snippet}...")),
                QaPair::new(CONSULTATION_QUESTION, CONSULTATION_ANSWER),
            ],
            outcome: FaqOutcome::ContentFallback { failure },
        }
    }
}
