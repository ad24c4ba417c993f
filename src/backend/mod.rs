//! Text-generation backends.
//!
//! The FAQ pipeline and the feature-area agents talk to a hosted model
//! through the [`TextBackend`] trait. [`OpenAiBackend`] is the production
//! implementation against any OpenAI-compatible endpoint (Groq by default);
//! tests substitute scripted backends.

pub mod openai;

pub use openai::OpenAiBackend;

use crate::error::BackendError;
use async_trait::async_trait;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A single request to a text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Optional system instruction.
    pub system: Option<String>,
    /// User instruction, with any content already interpolated.
    pub user: String,
    /// Per-request temperature; the backend default applies when `None`.
    pub temperature: Option<f32>,
}

impl Prompt {
    /// Creates a prompt with only a user instruction.
    #[must_use]
    pub fn user(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            temperature: None,
        }
    }

    /// Sets the system instruction.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Overrides the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Connection settings for an OpenAI-compatible backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the API.
    pub api_base: String,
    /// API key; required to build an [`OpenAiBackend`].
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Default sampling temperature.
    pub temperature: f32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A service that turns a prompt into generated text.
///
/// One call is one outbound request: implementations must not retry or
/// stream.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Sends `prompt` and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the request fails or produces no text.
    async fn generate(&self, prompt: &Prompt) -> Result<String, BackendError>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}

/// Backend standing in for one that could not be constructed.
///
/// Every call fails with [`BackendError::Unavailable`], which lets the FAQ
/// pipeline degrade to its service-failure answer instead of aborting.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    /// Creates a backend that always fails with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TextBackend for UnavailableBackend {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, BackendError> {
        Err(BackendError::Unavailable(self.reason.clone()))
    }

    fn model(&self) -> &str {
        "unavailable"
    }
}
