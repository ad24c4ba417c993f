//! Motivational quotes.

use super::{Agent, PromptSet};
use crate::backend::Prompt;
use crate::core::FeatureArea;
use rand::seq::SliceRandom;

/// Sampling temperature for quotes.
pub const MOTIVATION_TEMPERATURE: f32 = 0.8;

/// Built-in requests, one picked at random when no topic is given.
pub const MOTIVATION_USER_PROMPTS: [&str; 5] = [
    "What's a fresh motivational message for someone working on their physical health?",
    "Give a unique inspiring quote for a patient recovering from illness.",
    "Share a new quote that encourages mental wellness and balance.",
    "Offer a fresh, hopeful quote for someone starting a healthier lifestyle.",
    "Inspire someone with a non-cliché quote about health or strength.",
];

/// Produces a short motivational quote.
#[derive(Debug, Clone)]
pub struct MotivationCoach {
    request: String,
}

impl MotivationCoach {
    /// Picks one of the built-in requests at random.
    #[must_use]
    pub fn random() -> Self {
        let request = MOTIVATION_USER_PROMPTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(MOTIVATION_USER_PROMPTS[0]);
        Self {
            request: request.to_string(),
        }
    }

    /// Asks for a quote about `topic`.
    #[must_use]
    pub fn with_topic(topic: &str) -> Self {
        Self {
            request: format!(
                "Provide a new motivational quote related to {} that hasn't been used before.",
                topic.trim()
            ),
        }
    }

    /// Random request when `topic` is absent or blank.
    #[must_use]
    pub fn for_topic(topic: Option<&str>) -> Self {
        match topic {
            Some(t) if !t.trim().is_empty() => Self::with_topic(t),
            _ => Self::random(),
        }
    }

    /// The user request that will be sent.
    #[must_use]
    pub fn request(&self) -> &str {
        &self.request
    }
}

impl Agent for MotivationCoach {
    fn name(&self) -> &'static str {
        "motivation"
    }

    fn area(&self) -> Option<FeatureArea> {
        None
    }

    fn prompt(&self, prompts: &PromptSet) -> Prompt {
        Prompt::user(self.request.as_str())
            .with_system(prompts.motivation.as_str())
            .with_temperature(MOTIVATION_TEMPERATURE)
    }

    // Quotes are shown, never kept as session content.
    fn output_buffers(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picks_builtin() {
        for _ in 0..20 {
            let coach = MotivationCoach::random();
            assert!(MOTIVATION_USER_PROMPTS.contains(&coach.request()));
        }
    }

    #[test]
    fn test_topic_request() {
        let coach = MotivationCoach::for_topic(Some(" sleep "));
        assert_eq!(
            coach.request(),
            "Provide a new motivational quote related to sleep that hasn't been used before."
        );
        let prompt = coach.prompt(&PromptSet::defaults());
        assert_eq!(prompt.temperature, Some(MOTIVATION_TEMPERATURE));
    }

    #[test]
    fn test_blank_topic_is_random() {
        let coach = MotivationCoach::for_topic(Some("  "));
        assert!(MOTIVATION_USER_PROMPTS.contains(&coach.request()));
    }
}
