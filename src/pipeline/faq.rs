//! End-to-end FAQ generation.

use super::coerce::{ParseFailure, ResponseCoercer};
use super::request::FaqRequester;
use crate::backend::TextBackend;
use crate::core::QaPair;
use tracing::warn;

/// Question of the pair shown when the backend call fails.
pub const SERVICE_FAILURE_QUESTION: &str = "Why can't I see my FAQs?";

/// Answer of the pair shown when the backend call fails.
pub const SERVICE_FAILURE_ANSWER: &str =
    "The AI service encountered an issue. Please try again later.";

/// Which branch of the pipeline produced the pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqOutcome {
    /// A parse strategy succeeded.
    Parsed {
        /// Name of the winning strategy.
        strategy: &'static str,
    },
    /// Parsing failed; pairs were synthesized from the content.
    ContentFallback {
        /// Why the last attempt failed.
        failure: ParseFailure,
    },
    /// The backend call failed; a single apology pair was returned.
    ServiceFailure {
        /// Backend error message.
        reason: String,
    },
}

impl FaqOutcome {
    /// Stable label for storage and JSON output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Parsed { .. } => "parsed",
            Self::ContentFallback { .. } => "content_fallback",
            Self::ServiceFailure { .. } => "service_failure",
        }
    }

    /// Human-readable detail: strategy name, parse failure, or error.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Parsed { strategy } => (*strategy).to_string(),
            Self::ContentFallback { failure } => failure.to_string(),
            Self::ServiceFailure { reason } => reason.clone(),
        }
    }
}

/// Pairs plus the branch that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqResult {
    /// Pairs in display order.
    pub pairs: Vec<QaPair>,
    /// How they were obtained.
    pub outcome: FaqOutcome,
}

impl FaqResult {
    /// The single-pair result used when the backend is unreachable.
    #[must_use]
    pub fn service_failure(reason: impl Into<String>) -> Self {
        Self {
            pairs: vec![QaPair::new(SERVICE_FAILURE_QUESTION, SERVICE_FAILURE_ANSWER)],
            outcome: FaqOutcome::ServiceFailure {
                reason: reason.into(),
            },
        }
    }
}

/// Trims every pair and drops those with a blank question or answer.
#[must_use]
pub fn displayable(pairs: Vec<QaPair>) -> Vec<QaPair> {
    pairs
        .into_iter()
        .map(|pair| pair.trimmed())
        .filter(QaPair::is_displayable)
        .collect()
}

/// Requests, coerces and filters FAQs for a piece of content.
pub struct FaqGenerator<'a> {
    requester: FaqRequester<'a>,
    coercer: ResponseCoercer,
}

impl<'a> FaqGenerator<'a> {
    /// Creates a generator with the built-in template and parse chain.
    #[must_use]
    pub fn new(backend: &'a dyn TextBackend) -> Self {
        Self {
            requester: FaqRequester::new(backend),
            coercer: ResponseCoercer::new(),
        }
    }

    /// Replaces the FAQ instruction template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.requester = self.requester.with_template(template);
        self
    }

    /// Replaces the response coercer.
    ///
    /// # Examples
    ///
    /// ```
    /// use healthfaq::backend::UnavailableBackend;
    /// use healthfaq::pipeline::{FaqGenerator, ParseStrategy, ResponseCoercer, StrictJson};
    ///
    /// let backend = UnavailableBackend::new("offline");
    /// let strategies: Vec<Box<dyn ParseStrategy>> = vec![Box::new(StrictJson)];
    /// let _generator =
    ///     FaqGenerator::new(&backend).with_coercer(ResponseCoercer::with_strategies(strategies));
    /// ```
    #[must_use]
    pub fn with_coercer(mut self, coercer: ResponseCoercer) -> Self {
        self.coercer = coercer;
        self
    }

    /// Generates FAQs for `content`.
    ///
    /// Never fails and always returns at least one displayable pair.
    pub async fn generate(&self, content: &str) -> FaqResult {
        let raw = match self.requester.request_faqs(content).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "FAQ request failed");
                return FaqResult::service_failure(err.to_string());
            }
        };

        let FaqResult { pairs, outcome } = self.coercer.coerce(&raw, content);
        let pairs = displayable(pairs);
        if pairs.is_empty() {
            warn!("no displayable FAQ pairs, using content fallback");
            return self
                .coercer
                .content_fallback(content, ParseFailure::NothingDisplayable);
        }

        FaqResult { pairs, outcome }
    }
}

/// Generates displayable FAQs for `content` with default settings.
pub async fn generate_faqs(backend: &dyn TextBackend, content: &str) -> Vec<QaPair> {
    FaqGenerator::new(backend).generate(content).await.pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::pipeline::coerce::CONSULTATION_QUESTION;
    use crate::pipeline::testing::ScriptedBackend;

    #[test]
    fn test_displayable_filters_and_trims() {
        let pairs = vec![
            QaPair::new("  Q1 ", " A1\n"),
            QaPair::new("", "A2"),
            QaPair::new("Q3", "   "),
        ];
        assert_eq!(displayable(pairs), vec![QaPair::new("Q1", "A1")]);
    }

    #[tokio::test]
    async fn test_parsed_pairs() {
        let backend = ScriptedBackend::replying(
            r#"[{"question":"Is 190 LDL high?","answer":"Yes."},{"question":"What diet helps?","answer":"Less saturated fat."}]"#,
        );
        let result = FaqGenerator::new(&backend).generate("LDL 190").await;
        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.outcome.label(), "parsed");
    }

    #[tokio::test]
    async fn test_blank_pairs_dropped() {
        let backend = ScriptedBackend::replying(
            r#"[{"question":"Q","answer":"A"},{"question":"","answer":"orphan"}]"#,
        );
        let pairs = generate_faqs(&backend, "content").await;
        assert_eq!(pairs, vec![QaPair::new("Q", "A")]);
    }

    #[tokio::test]
    async fn test_all_blank_pairs_fall_back_to_content() {
        let backend = ScriptedBackend::replying(r#"[{"question":" ","answer":" "}]"#);
        let result = FaqGenerator::new(&backend).generate("Rest well. Drink water.").await;
        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.pairs[0].answer, "Rest well...");
        assert_eq!(
            result.outcome,
            FaqOutcome::ContentFallback { failure: ParseFailure::NothingDisplayable }
        );
    }

    #[tokio::test]
    async fn test_garbage_reply() {
        let backend = ScriptedBackend::replying("The model is overloaded");
        let pairs = generate_faqs(&backend, "Iron is low.").await;
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].question, CONSULTATION_QUESTION);
    }

    #[tokio::test]
    async fn test_backend_error_gives_single_pair() {
        let backend = ScriptedBackend::failing(BackendError::Request("timeout".to_string()));
        let result = FaqGenerator::new(&backend).generate("content").await;
        assert_eq!(
            result.pairs,
            vec![QaPair::new(SERVICE_FAILURE_QUESTION, SERVICE_FAILURE_ANSWER)]
        );
        assert_eq!(result.outcome.label(), "service_failure");
        assert!(result.outcome.detail().contains("timeout"));
    }

    #[tokio::test]
    async fn test_custom_template_reaches_backend() {
        let backend = ScriptedBackend::replying(r#"[{"question":"Q","answer":"A"}]"#);
        let _ = FaqGenerator::new(&backend)
            .with_template("FAQ <<{content}>>")
            .generate("body")
            .await;
        assert_eq!(backend.last_prompt().unwrap().user, "FAQ <<body>>");
    }
}
