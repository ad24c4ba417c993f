//! # healthfaq
//!
//! Contextual FAQ generation for a patient health portal.
//!
//! Feature areas (assistant, tablet, report, profile) record their outputs
//! as named session buffers. healthfaq picks the most relevant buffer for an
//! area, asks a hosted model for short question/answer pairs about it, and
//! always hands back something displayable, even when the model misbehaves.
//!
//! ## Features
//!
//! - **Context selection**: Area-preferred buffers with a length-gated fallback scan
//! - **Tolerant parsing**: Strict JSON, then bracket extraction, then content-derived pairs
//! - **`SQLite` Storage**: Session identity, buffers and FAQ history across invocations
//! - **Agents**: Report summaries, medicine descriptions and motivational quotes

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod backend;
pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{BackendError, Error, Result};

// Re-export core domain types
pub use core::{BufferStore, ContentBuffer, FeatureArea, Identity, Payload, QaPair, Session};

// Re-export pipeline types
pub use pipeline::{
    ContextSelector, FaqGenerator, FaqOutcome, FaqResult, ResponseCoercer, SelectionConfig,
    coalesce, generate_faqs, select_context,
};

// Re-export backend types
pub use backend::{BackendConfig, OpenAiBackend, Prompt, TextBackend, UnavailableBackend};

// Re-export agent types
pub use agent::{Agent, AgentOutput, MotivationCoach, PromptSet, ReportAnalyst, TabletDescriber};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, FaqRecord, FaqSource, SqliteStorage, Storage};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat, execute, execute_with_backend};
