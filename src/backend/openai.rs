//! OpenAI-compatible chat completion backend.

use super::{BackendConfig, Prompt, TextBackend};
use crate::error::BackendError;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Chat-completion client for Groq or any OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiBackend {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingApiKey`] when no non-empty key is set.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(BackendError::MissingApiKey)?;

        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.api_base)
            .with_api_key(api_key);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn messages(prompt: &Prompt) -> Result<Vec<ChatCompletionRequestMessage>, BackendError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.as_str())
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.as_str())
                .build()?
                .into(),
        );
        Ok(messages)
    }
}

#[async_trait]
impl TextBackend for OpenAiBackend {
    async fn generate(&self, prompt: &Prompt) -> Result<String, BackendError> {
        let temperature = prompt.temperature.unwrap_or(self.temperature);
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(Self::messages(prompt)?)
            .temperature(temperature)
            .build()?;

        info!(model = %self.model, temperature, "sending chat completion");
        let response = self.client.chat().create(request).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(BackendError::EmptyResponse)?;
        debug!(chars = text.chars().count(), "received completion");

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_rejected() {
        let config = BackendConfig::default();
        assert_eq!(
            OpenAiBackend::new(&config).unwrap_err(),
            BackendError::MissingApiKey
        );

        let blank = BackendConfig {
            api_key: Some("   ".to_string()),
            ..BackendConfig::default()
        };
        assert_eq!(
            OpenAiBackend::new(&blank).unwrap_err(),
            BackendError::MissingApiKey
        );
    }

    #[test]
    fn test_builds_with_key() {
        let config = BackendConfig {
            api_key: Some("gsk_test".to_string()),
            model: "llama-3.1-8b-instant".to_string(),
            ..BackendConfig::default()
        };
        let backend = OpenAiBackend::new(&config).unwrap();
        assert_eq!(backend.model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_messages_include_system_when_present() {
        let prompt = Prompt::user("hi").with_system("sys");
        assert_eq!(OpenAiBackend::messages(&prompt).unwrap().len(), 2);
        assert_eq!(
            OpenAiBackend::messages(&Prompt::user("hi")).unwrap().len(),
            1
        );
    }
}
