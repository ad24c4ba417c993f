//! Medical report analysis.

use super::{Agent, PromptSet};
use crate::backend::Prompt;
use crate::core::FeatureArea;
use crate::core::area::REPORT_SUMMARY;
use crate::error::{CommandError, Result};
use crate::io::read_report_text;
use std::path::Path;

/// Sampling temperature for report analysis.
pub const REPORT_TEMPERATURE: f32 = 0.2;

/// Summarizes a plain-text medical report.
#[derive(Debug, Clone)]
pub struct ReportAnalyst {
    report_text: String,
}

impl ReportAnalyst {
    /// Creates an analyst for already-extracted report text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank.
    pub fn new(report_text: impl Into<String>) -> Result<Self> {
        let report_text = report_text.into();
        if report_text.trim().is_empty() {
            return Err(CommandError::InvalidArgument(
                "no readable text found in report".to_string(),
            )
            .into());
        }
        Ok(Self { report_text })
    }

    /// Reads a `txt`, `md` or `text` report from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for unsupported or unreadable files, or an
    /// argument error if the file holds no text.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(read_report_text(path)?)
    }

    /// The report text sent to the backend.
    #[must_use]
    pub fn report_text(&self) -> &str {
        &self.report_text
    }
}

impl Agent for ReportAnalyst {
    fn name(&self) -> &'static str {
        "report"
    }

    fn area(&self) -> Option<FeatureArea> {
        Some(FeatureArea::Report)
    }

    fn prompt(&self, prompts: &PromptSet) -> Prompt {
        Prompt::user(format!("Here is the report text:\n{}", self.report_text))
            .with_system(prompts.report.as_str())
            .with_temperature(REPORT_TEMPERATURE)
    }

    fn output_buffers(&self) -> Vec<&'static str> {
        vec![REPORT_SUMMARY]
    }
}
