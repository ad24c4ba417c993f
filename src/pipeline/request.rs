//! Asking the backend for question/answer pairs.

use crate::backend::{Prompt, TextBackend};
use crate::error::BackendError;
use tracing::info;

/// Placeholder replaced with the source content in FAQ templates.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Default FAQ instruction template.
pub const FAQ_PROMPT_TEMPLATE: &str = r#"You are a helpful medical FAQ generator for a Health Assistant app.
Based ONLY on the following content:
---
{content}
---
Generate 3 to 5 very relevant FAQs that a patient might naturally ask.
Keep answers short, clear, and medically safe.
Do not explain what the assistant is or give generic FAQs.
Only focus on the medical issue, treatment, lifestyle, or diet from the text.

Return strictly as a JSON array of objects with the keys "question" and "answer":
[
  {"question": "string", "answer": "string"},
  {"question": "string", "answer": "string"}
]"#;

/// Sends one FAQ request per call.
///
/// Callers are expected to skip empty content; the requester forwards
/// whatever it is given.
pub struct FaqRequester<'a> {
    backend: &'a dyn TextBackend,
    template: String,
}

impl<'a> FaqRequester<'a> {
    /// Creates a requester using the built-in template.
    #[must_use]
    pub fn new(backend: &'a dyn TextBackend) -> Self {
        Self {
            backend,
            template: FAQ_PROMPT_TEMPLATE.to_string(),
        }
    }

    /// Replaces the instruction template. It should contain
    /// [`CONTENT_PLACEHOLDER`].
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Builds the prompt with `content` embedded verbatim.
    #[must_use]
    pub fn build_prompt(&self, content: &str) -> Prompt {
        Prompt::user(self.template.replace(CONTENT_PLACEHOLDER, content))
    }

    /// Calls the backend once and returns its trimmed reply.
    ///
    /// # Errors
    ///
    /// Propagates the backend's error; there is no retry.
    pub async fn request_faqs(&self, content: &str) -> Result<String, BackendError> {
        let prompt = self.build_prompt(content);
        info!(
            model = self.backend.model(),
            content_chars = content.chars().count(),
            "requesting FAQs"
        );
        let raw = self.backend.generate(&prompt).await?;
        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::ScriptedBackend;

    #[test]
    fn test_prompt_embeds_content_verbatim() {
        let backend = ScriptedBackend::replying("[]");
        let requester = FaqRequester::new(&backend);
        let prompt = requester.build_prompt("LDL {high} at 190 mg/dL");
        assert!(prompt.user.contains("---\nLDL {high} at 190 mg/dL\n---"));
        assert!(prompt.user.contains("JSON array"));
        assert!(prompt.system.is_none());
    }

    #[test]
    fn test_custom_template() {
        let backend = ScriptedBackend::replying("[]");
        let requester = FaqRequester::new(&backend).with_template("Q&A for: {content}");
        assert_eq!(requester.build_prompt("x").user, "Q&A for: x");
    }

    #[tokio::test]
    async fn test_reply_is_trimmed_and_single_call() {
        let backend = ScriptedBackend::replying("\n  [ ]  \n");
        let requester = FaqRequester::new(&backend);
        assert_eq!(requester.request_faqs("content").await.unwrap(), "[ ]");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_error_propagates() {
        let backend = ScriptedBackend::failing(BackendError::EmptyResponse);
        let requester = FaqRequester::new(&backend);
        assert_eq!(
            requester.request_faqs("content").await.unwrap_err(),
            BackendError::EmptyResponse
        );
    }
}
