//! Medicine description from tablet label text.

use super::{Agent, BufferWrite, PromptSet};
use crate::backend::Prompt;
use crate::core::FeatureArea;
use crate::core::area::{OCR_TEXT, TABLET_OUTPUT};
use crate::error::{CommandError, Result};

/// Sampling temperature for tablet descriptions.
pub const TABLET_TEMPERATURE: f32 = 0.3;

/// Explains what a medicine is for, given the text read off its label.
#[derive(Debug, Clone)]
pub struct TabletDescriber {
    label_text: String,
}

impl TabletDescriber {
    /// Creates a describer from OCR output.
    ///
    /// Line breaks are folded into spaces and the result trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if no text remains.
    pub fn new(ocr_text: &str) -> Result<Self> {
        let label_text = ocr_text.trim().replace(['\r', '\n'], " ");
        if label_text.is_empty() {
            return Err(CommandError::InvalidArgument("no text detected on label".to_string()).into());
        }
        Ok(Self { label_text })
    }

    /// The cleaned label text.
    #[must_use]
    pub fn label_text(&self) -> &str {
        &self.label_text
    }
}

impl Agent for TabletDescriber {
    fn name(&self) -> &'static str {
        "tablet"
    }

    fn area(&self) -> Option<FeatureArea> {
        Some(FeatureArea::Tablet)
    }

    fn prompt(&self, prompts: &PromptSet) -> Prompt {
        Prompt::user(format!(
            "Medicine or composition: {}. Explain what it does, and what condition it is commonly used for.",
            self.label_text
        ))
        .with_system(prompts.tablet.as_str())
        .with_temperature(TABLET_TEMPERATURE)
    }

    fn output_buffers(&self) -> Vec<&'static str> {
        vec![TABLET_OUTPUT]
    }

    fn input_writes(&self) -> Vec<BufferWrite> {
        vec![BufferWrite {
            name: OCR_TEXT.to_string(),
            area: Some(FeatureArea::Tablet),
            text: self.label_text.clone(),
        }]
    }
}
