//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::agent::AgentOutput;
use crate::core::{ContentBuffer, FeatureArea, Identity};
use crate::error::Error;
use crate::io::ellipsize;
use crate::pipeline::FaqResult;
use crate::storage::{FaqRecord, FaqSource, StorageStats};
use serde::Serialize;
use std::fmt::Write;

/// Message shown when there is nothing to generate FAQs from.
pub const NO_CONTENT_MESSAGE: &str = "No content available.";

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StorageStats, identity: &Identity, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats, identity),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Status<'a> {
                #[serde(flatten)]
                stats: &'a StorageStats,
                name: Option<&'a str>,
                email: Option<&'a str>,
            }
            format_json(&Status {
                stats,
                name: identity.name.as_deref(),
                email: identity.email.as_deref(),
            })
        }
    }
}

fn format_status_text(stats: &StorageStats, identity: &Identity) -> String {
    let mut output = String::new();
    output.push_str("healthfaq Status\n");
    output.push_str("================\n\n");
    let user = if identity.logged_in {
        identity.name.as_deref().unwrap_or("(unnamed)")
    } else {
        "not logged in"
    };
    let _ = writeln!(output, "  User:          {user}");
    let _ = writeln!(output, "  Buffers:       {}", stats.buffer_count);
    let _ = writeln!(
        output,
        "  Content size:  {}",
        format_size(stats.total_content_size)
    );
    let _ = writeln!(output, "  FAQ runs:      {}", stats.history_count);
    let _ = writeln!(output, "  Schema:        v{}", stats.schema_version);
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:       {size} bytes");
    }
    output
}

/// Formats a buffer list.
#[must_use]
pub fn format_buffer_list(buffers: &[ContentBuffer], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_buffer_list_text(buffers),
        OutputFormat::Json => format_json(&buffers),
    }
}

fn format_buffer_list_text(buffers: &[ContentBuffer]) -> String {
    if buffers.is_empty() {
        return "No buffers found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Buffers:\n");
    let _ = writeln!(
        output,
        "{:<6} {:<22} {:<10} {:<10} Preview",
        "ID", "Name", "Area", "Size"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for buffer in buffers {
        let id = buffer.id.map_or_else(|| "-".to_string(), |i| i.to_string());
        let area = buffer.area.map_or("-", FeatureArea::as_str);
        let preview = buffer.text.replace('\n', " ");

        let _ = writeln!(
            output,
            "{:<6} {:<22} {:<10} {:<10} {}",
            id,
            ellipsize(&buffer.name, 22),
            area,
            format_size(buffer.metadata.size),
            ellipsize(preview.trim(), 30)
        );
    }

    output
}

/// Formats a single buffer.
#[must_use]
pub fn format_buffer(buffer: &ContentBuffer, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Buffer: {}", buffer.name);
            let _ = writeln!(output, "  ID:           {}", buffer.id.unwrap_or(0));
            let _ = writeln!(
                output,
                "  Area:         {}",
                buffer.area.map_or("none", FeatureArea::as_str)
            );
            let _ = writeln!(output, "  Size:         {} bytes", buffer.metadata.size);
            let _ = writeln!(output, "  Characters:   {}", buffer.char_count());
            output.push('\n');
            output.push_str(&buffer.text);
            output.push('\n');
            output
        }
        OutputFormat::Json => format_json(buffer),
    }
}

/// Formats selected context.
#[must_use]
pub fn format_context(area: FeatureArea, context: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text if context.is_empty() => format!("{NO_CONTENT_MESSAGE}\n"),
        OutputFormat::Text => format!("{context}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({
            "area": area,
            "chars": context.chars().count(),
            "context": context,
        })),
    }
}

/// Formats the silent no-op result of `faq` without content.
#[must_use]
pub fn format_no_content(format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{NO_CONTENT_MESSAGE}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({
            "pairs": [],
            "message": NO_CONTENT_MESSAGE,
        })),
    }
}

/// Formats generated FAQs as numbered `Q1..Qn` entries.
#[must_use]
pub fn format_faqs(result: &FaqResult, source: FaqSource, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for (i, pair) in result.pairs.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                let n = i + 1;
                let _ = writeln!(output, "Q{n}: {}", pair.question);
                let _ = writeln!(output, "A{n}: {}", pair.answer);
            }
            output
        }
        OutputFormat::Json => format_json(&serde_json::json!({
            "source": source,
            "outcome": result.outcome.label(),
            "detail": result.outcome.detail(),
            "pairs": result.pairs,
        })),
    }
}

/// Formats an agent's generated text.
#[must_use]
pub fn format_agent_output(output: &AgentOutput, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", output.text),
        OutputFormat::Json => format_json(&serde_json::json!({
            "agent": output.agent,
            "text": output.text,
            "buffers": output.writes.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
        })),
    }
}

/// Formats FAQ history, newest first.
#[must_use]
pub fn format_history(records: &[FaqRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if records.is_empty() {
                return "No FAQ runs recorded.\n".to_string();
            }
            let mut output = String::new();
            for record in records {
                let _ = writeln!(
                    output,
                    "#{} [{}] source={} area={} pairs={}",
                    record.id.unwrap_or(0),
                    record.outcome,
                    record.source,
                    record.area.map_or("-", FeatureArea::as_str),
                    record.pairs.len()
                );
                for pair in &record.pairs {
                    let _ = writeln!(output, "    Q: {}", ellipsize(&pair.question, 70));
                }
            }
            output
        }
        OutputFormat::Json => format_json(&records),
    }
}

/// Formats an error for display.
///
/// JSON errors carry a machine-readable category alongside the message.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            let kind = match error {
                Error::Storage(_) => "storage",
                Error::Backend(_) => "backend",
                Error::Io(_) => "io",
                Error::Command(_) => "command",
                Error::InvalidState { .. } => "invalid_state",
                Error::Config { .. } => "config",
            };
            format_json(&serde_json::json!({
                "error": kind,
                "message": error.to_string(),
            }))
        }
    }
}

fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QaPair;
    use crate::error::StorageError;
    use crate::pipeline::FaqOutcome;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_format_faqs_numbered() {
        let result = FaqResult {
            pairs: vec![QaPair::new("First?", "One."), QaPair::new("Second?", "Two.")],
            outcome: FaqOutcome::Parsed { strategy: "strict_json" },
        };
        let text = format_faqs(&result, FaqSource::Explicit, OutputFormat::Text);
        assert_eq!(text, "Q1: First?\nA1: One.\n\nQ2: Second?\nA2: Two.\n");

        let json = format_faqs(&result, FaqSource::Selected, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "parsed");
        assert_eq!(value["source"], "selected");
        assert_eq!(value["pairs"][1]["answer"], "Two.");
    }

    #[test]
    fn test_format_context_empty() {
        assert_eq!(
            format_context(FeatureArea::Tablet, "", OutputFormat::Text),
            "No content available.\n"
        );
    }

    #[test]
    fn test_format_error_json() {
        let err: Error = StorageError::NotInitialized.into();
        let json = format_error(&err, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], "storage");
        assert!(value["message"].as_str().unwrap().contains("healthfaq init"));
    }

    #[test]
    fn test_buffer_list_preview_multibyte() {
        let buffers = vec![ContentBuffer::new("ocr_text", None, "パラセタモール ".repeat(10))];
        let text = format_buffer_list(&buffers, OutputFormat::Text);
        assert!(text.contains("ocr_text"));
        assert!(text.contains("..."));
    }
}
