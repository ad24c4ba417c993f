//! Feature-area agents.
//!
//! Each agent turns one user action into a single backend request and
//! names the session buffers its output belongs in. Agents write only
//! their own buffers; the shared `latest_output` slot is left to callers.

pub mod diet;
pub mod motivation;
pub mod prompt;
pub mod report;
pub mod tablet;

pub use diet::DietPlanner;
pub use motivation::{MOTIVATION_USER_PROMPTS, MotivationCoach};
pub use prompt::{
    DIET_SYSTEM_PROMPT, MOTIVATION_SYSTEM_PROMPT, PROMPT_DIR_ENV, PromptSet,
    REPORT_SYSTEM_PROMPT, TABLET_SYSTEM_PROMPT,
};
pub use report::ReportAnalyst;
pub use tablet::TabletDescriber;

use crate::backend::{Prompt, TextBackend};
use crate::core::{FeatureArea, Session};
use crate::error::{BackendError, Result};
use tracing::info;

/// A buffer write produced by an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferWrite {
    /// Buffer name.
    pub name: String,
    /// Owning feature area.
    pub area: Option<FeatureArea>,
    /// Text to store.
    pub text: String,
}

/// Result of one agent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutput {
    /// Agent name.
    pub agent: &'static str,
    /// Generated text, trimmed.
    pub text: String,
    /// Buffers to write, in order.
    pub writes: Vec<BufferWrite>,
}

impl AgentOutput {
    /// Applies every write to an in-memory session.
    pub fn apply_to(&self, session: &mut Session) {
        for write in &self.writes {
            session.set_buffer(&write.name, write.area, write.text.clone());
        }
    }
}

/// A feature action backed by one model call.
pub trait Agent {
    /// Short identifier.
    fn name(&self) -> &'static str;

    /// Area the output belongs to.
    fn area(&self) -> Option<FeatureArea>;

    /// Builds the request for this run.
    fn prompt(&self, prompts: &PromptSet) -> Prompt;

    /// Buffers that receive the generated text. Empty for display-only
    /// agents.
    fn output_buffers(&self) -> Vec<&'static str>;

    /// Extra writes derived from the input rather than the output.
    fn input_writes(&self) -> Vec<BufferWrite> {
        Vec::new()
    }
}

/// Runs `agent` once against `backend`.
///
/// # Errors
///
/// Returns a backend error if the call fails or yields only whitespace.
pub async fn run_agent(
    agent: &dyn Agent,
    backend: &dyn TextBackend,
    prompts: &PromptSet,
) -> Result<AgentOutput> {
    let prompt = agent.prompt(prompts);
    info!(agent = agent.name(), model = backend.model(), "running agent");

    let text = backend.generate(&prompt).await?.trim().to_string();
    if text.is_empty() {
        return Err(BackendError::EmptyResponse.into());
    }

    let area = agent.area();
    let mut writes = agent.input_writes();
    writes.extend(
        agent
            .output_buffers()
            .into_iter()
            .map(|name| BufferWrite {
                name: name.to_string(),
                area,
                text: text.clone(),
            }),
    );

    Ok(AgentOutput {
        agent: agent.name(),
        text,
        writes,
    })
}
