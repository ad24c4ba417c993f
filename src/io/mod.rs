//! I/O utilities for healthfaq.
//!
//! Provides file reading and writing for reports and prompt templates,
//! along with grapheme-aware text helpers.

pub mod reader;
pub mod unicode;

pub use reader::{read_file, read_report_text, write_file};
pub use unicode::{ellipsize, first_sentence, grapheme_count, truncate_graphemes};
