//! Scripted backend for unit tests.

use crate::backend::{Prompt, TextBackend};
use crate::error::BackendError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Returns a fixed reply and records every prompt it receives.
pub struct ScriptedBackend {
    reply: Result<String, BackendError>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: BackendError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn generate(&self, prompt: &Prompt) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone()
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
