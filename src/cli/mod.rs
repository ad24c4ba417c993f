//! CLI layer for healthfaq.
//!
//! Provides the command-line interface using clap, with commands for
//! managing the session, recording buffers, and generating FAQs.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{execute, execute_with_backend};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
