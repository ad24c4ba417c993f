//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::backend::{BackendConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::core::FeatureArea;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// healthfaq: contextual FAQ generation for a patient health portal.
///
/// Records the output of health features as session buffers and turns the
/// most relevant ones into short patient FAQs using a hosted model.
#[derive(Parser, Debug)]
#[command(name = "healthfaq")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the session database file.
    ///
    /// Defaults to `.healthfaq/session.db` in the current directory.
    #[arg(short, long, env = "HEALTHFAQ_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// API key for the text-generation service.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "HEALTHFAQ_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Model identifier.
    #[arg(long, env = "HEALTHFAQ_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Default sampling temperature.
    #[arg(long, env = "HEALTHFAQ_TEMPERATURE", default_value = "0.3", global = true)]
    pub temperature: f32,

    /// Directory with prompt template overrides.
    ///
    /// Defaults to `~/.config/healthfaq/prompts`.
    #[arg(long, env = "HEALTHFAQ_PROMPT_DIR", global = true)]
    pub prompt_dir: Option<PathBuf>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the session database.
    ///
    /// Creates the database file and schema if they don't exist.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show session status.
    Status,

    /// Reset the session (delete identity, buffers and history).
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Start a session for a user.
    Login {
        /// Display name.
        #[arg(long)]
        name: String,

        /// Email address.
        #[arg(long)]
        email: String,
    },

    /// End the session, clearing identity and every buffer.
    Logout,

    /// Write text into a named buffer.
    Record {
        /// Buffer name (e.g. `diagnosis_output`).
        name: String,

        /// Buffer text (reads from stdin if not provided).
        content: Option<String>,

        /// Feature area that owns the buffer.
        #[arg(short, long, value_enum)]
        area: Option<FeatureArea>,
    },

    /// List all buffers.
    #[command(name = "list", alias = "ls")]
    ListBuffers,

    /// Show a buffer.
    #[command(name = "show")]
    ShowBuffer {
        /// Buffer name.
        name: String,
    },

    /// Print the context the FAQ generator would use for an area.
    Context {
        /// Feature area.
        #[arg(short, long, value_enum, default_value = "assistant")]
        area: FeatureArea,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Generate FAQs from explicit content or session buffers.
    Faq {
        /// Feature area used when no content is given.
        #[arg(short, long, value_enum)]
        area: Option<FeatureArea>,

        /// Explicit content.
        #[arg(long, group = "source")]
        content: Option<String>,

        /// Read content from a text file.
        #[arg(long, group = "source")]
        file: Option<PathBuf>,

        /// Read content from a JSON file of any shape.
        #[arg(long, group = "source")]
        json: Option<PathBuf>,

        /// Accept only a reply that is exactly a JSON array.
        #[arg(long)]
        strict_only: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Summarize a plain-text medical report.
    AnalyzeReport {
        /// Report file (txt, md, text).
        file: PathBuf,
    },

    /// Describe a medicine from its label text.
    DescribeTablet {
        /// Label text as read by OCR (reads from stdin if not provided).
        text: Option<String>,
    },

    /// Suggest a diet plan with recipes for the logged-in user.
    Diet {
        /// Current symptoms (comma-separated or repeated).
        #[arg(long, value_delimiter = ',')]
        symptoms: Vec<String>,

        /// Known conditions (comma-separated or repeated).
        #[arg(long, value_delimiter = ',')]
        conditions: Vec<String>,
    },

    /// Generate a motivational quote (not kept in the session).
    Quote {
        /// Topic for the quote.
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Show recent FAQ runs.
    History {
        /// Maximum number of runs to show.
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Write the default prompt templates for editing.
    Prompts {
        /// Target directory (defaults to the prompt directory).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Length threshold overrides for context selection.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct ThresholdArgs {
    /// Minimum characters for an area's preferred buffer.
    #[arg(long)]
    pub area_min: Option<usize>,

    /// Minimum characters for a buffer found by the fallback scan.
    #[arg(long)]
    pub fallback_min: Option<usize>,
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }

    /// Builds backend settings from the global options.
    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}
