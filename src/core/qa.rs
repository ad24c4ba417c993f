//! Question/answer pairs.

use serde::{Deserialize, Serialize};

/// A question/answer unit of FAQ output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    /// The question a patient might ask.
    pub question: String,
    /// The answer derived from the supplied content.
    pub answer: String,
}

impl QaPair {
    /// Creates a pair from anything string-like.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Returns `true` when both fields are non-empty after trimming.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }

    /// Returns a copy with both fields trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(self.question.trim(), self.answer.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayable() {
        assert!(QaPair::new("Q", "A").is_displayable());
        assert!(!QaPair::new("  ", "A").is_displayable());
        assert!(!QaPair::new("Q", "\n").is_displayable());
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(
            QaPair::new("  What? ", " This. ").trimmed(),
            QaPair::new("What?", "This.")
        );
    }
}
