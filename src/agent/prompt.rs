//! Prompt templates for the FAQ generator and feature-area agents.
//!
//! Every template has a compiled-in default and may be overridden by a
//! markdown file in the prompt directory.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::write_file;
use crate::pipeline::FAQ_PROMPT_TEMPLATE;

/// System prompt for medical report analysis.
pub const REPORT_SYSTEM_PROMPT: &str = "You are a helpful and knowledgeable medical assistant.
Analyze the following medical report and provide:

1. A short summary of the diagnosis (in simple language).
2. Key positives in the report.
3. Key concerns or negatives (e.g., abnormal or dangerous values).
4. Clear, patient-friendly advice or next steps to improve their health.";

/// System prompt for describing a medicine from its label text.
pub const TABLET_SYSTEM_PROMPT: &str = "You are a skilled pharmacist. Based on the medicine name or composition given, \
describe what the tablet is used for, the medical condition it treats, and how it works. \
Keep it simple and clear for patients.";

/// System prompt for diet plans.
pub const DIET_SYSTEM_PROMPT: &str = "You are a kind dietician. You know a lot about food, diets, and cooking.
You give diets and recipes for both vegan and non-vegan foods.
Do not give any recipe with beef or pork.
Always talk to the patient using their name instead of 'he', 'she', or 'they'.

Recipe formatting rules:
- Start each recipe with a line like \"Recipe 1: Apple Soup\".
- List the ingredients under \"Ingredients:\", one per line.
- List the steps under \"Steps:\", one step per line (\"Step 1: ...\").
- Never put two steps on the same line.
- Use simple English and short sentences.
- Give at least 2 Veg recipes and 2 Non-Veg recipes.";

/// System prompt for motivational quotes.
pub const MOTIVATION_SYSTEM_PROMPT: &str = "You are a compassionate assistant who provides short, uplifting, and unique motivational quotes \
to inspire people on their health journey. Always generate a fresh quote and avoid repeating previous ones. \
Be original and emotionally resonant.";

/// Default prompt directory under user config.
const DEFAULT_PROMPT_DIR: &str = ".config/healthfaq/prompts";

/// Environment variable overriding the prompt directory.
pub const PROMPT_DIR_ENV: &str = "HEALTHFAQ_PROMPT_DIR";

const FAQ_FILENAME: &str = "faq.md";
const REPORT_FILENAME: &str = "report.md";
const TABLET_FILENAME: &str = "tablet.md";
const DIET_FILENAME: &str = "diet.md";
const MOTIVATION_FILENAME: &str = "motivation.md";

/// The full set of prompts used by the application.
///
/// Use [`PromptSet::load`] to resolve the prompt directory from CLI flags,
/// environment variables, or the default path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// FAQ instruction template; `{content}` marks where the source goes.
    pub faq: String,
    /// System prompt for report analysis.
    pub report: String,
    /// System prompt for tablet description.
    pub tablet: String,
    /// System prompt for diet plans.
    pub diet: String,
    /// System prompt for motivational quotes.
    pub motivation: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl PromptSet {
    /// Loads prompts from the given directory, falling back to compiled-in defaults.
    ///
    /// Resolution order for `prompt_dir`:
    /// 1. Explicit `prompt_dir` argument (from `--prompt-dir` CLI flag)
    /// 2. `HEALTHFAQ_PROMPT_DIR` environment variable
    /// 3. `~/.config/healthfaq/prompts/`
    ///
    /// Each file is loaded independently. A missing or blank file uses its
    /// default.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let resolved_dir = prompt_dir
            .map(PathBuf::from)
            .or_else(|| std::env::var(PROMPT_DIR_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_dir);

        let load_file = |filename: &str, default: &str| -> String {
            resolved_dir
                .as_ref()
                .map(|dir| dir.join(filename))
                .and_then(|path| std::fs::read_to_string(&path).ok())
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            faq: load_file(FAQ_FILENAME, FAQ_PROMPT_TEMPLATE),
            report: load_file(REPORT_FILENAME, REPORT_SYSTEM_PROMPT),
            tablet: load_file(TABLET_FILENAME, TABLET_SYSTEM_PROMPT),
            diet: load_file(DIET_FILENAME, DIET_SYSTEM_PROMPT),
            motivation: load_file(MOTIVATION_FILENAME, MOTIVATION_SYSTEM_PROMPT),
        }
    }

    /// Returns compiled-in defaults without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            faq: FAQ_PROMPT_TEMPLATE.to_string(),
            report: REPORT_SYSTEM_PROMPT.to_string(),
            tablet: TABLET_SYSTEM_PROMPT.to_string(),
            diet: DIET_SYSTEM_PROMPT.to_string(),
            motivation: MOTIVATION_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Writes the compiled-in default prompts to the given directory.
    ///
    /// Creates the directory if it does not exist. Existing files are
    /// **not** overwritten.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if directory creation or file writing fails.
    pub fn write_defaults(dir: &Path) -> Result<Vec<PathBuf>> {
        let templates = [
            (FAQ_FILENAME, FAQ_PROMPT_TEMPLATE),
            (REPORT_FILENAME, REPORT_SYSTEM_PROMPT),
            (TABLET_FILENAME, TABLET_SYSTEM_PROMPT),
            (DIET_FILENAME, DIET_SYSTEM_PROMPT),
            (MOTIVATION_FILENAME, MOTIVATION_SYSTEM_PROMPT),
        ];

        let mut written = Vec::new();
        for (filename, content) in &templates {
            let path = dir.join(filename);
            if !path.exists() {
                write_file(&path, content)?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Returns the default prompt directory under the user's home.
    ///
    /// Returns `None` if the home directory cannot be determined.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(DEFAULT_PROMPT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_not_empty() {
        let prompts = PromptSet::defaults();
        assert!(prompts.faq.contains("{content}"));
        assert!(prompts.report.contains("medical report"));
        assert!(prompts.tablet.contains("pharmacist"));
        assert!(prompts.diet.contains("dietician"));
        assert!(!prompts.motivation.is_empty());
    }

    #[test]
    fn test_load_overrides_single_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("tablet.md"), "Custom pharmacist").unwrap();
        std::fs::write(temp.path().join("report.md"), "   \n").unwrap();

        let prompts = PromptSet::load(Some(temp.path()));
        assert_eq!(prompts.tablet, "Custom pharmacist");
        assert_eq!(prompts.report, REPORT_SYSTEM_PROMPT);
        assert_eq!(prompts.faq, FAQ_PROMPT_TEMPLATE);
    }

    #[test]
    fn test_write_defaults_does_not_overwrite() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("faq.md"), "mine {content}").unwrap();

        let written = PromptSet::write_defaults(temp.path()).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("faq.md")).unwrap(),
            "mine {content}"
        );
        assert!(PromptSet::write_defaults(temp.path()).unwrap().is_empty());
    }
}
