//! Diet plans from symptoms and conditions.

use super::{Agent, PromptSet};
use crate::backend::Prompt;
use crate::core::FeatureArea;
use crate::core::area::DIET_OUTPUT;
use crate::error::{CommandError, Result};

/// Sampling temperature for diet plans.
pub const DIET_TEMPERATURE: f32 = 0.0;

const DEFAULT_PATIENT: &str = "the patient";
const NONE_REPORTED: &str = "none reported";

/// Builds a diet plan with recipes for the assistant area.
#[derive(Debug, Clone)]
pub struct DietPlanner {
    patient: String,
    symptoms: Vec<String>,
    conditions: Vec<String>,
}

impl DietPlanner {
    /// Creates a planner for a patient.
    ///
    /// Blank entries are dropped. A missing or blank name is replaced by a
    /// neutral form of address.
    ///
    /// # Errors
    ///
    /// Returns an error if neither a symptom nor a condition remains.
    pub fn new(patient: Option<&str>, symptoms: &[String], conditions: &[String]) -> Result<Self> {
        let symptoms = clean(symptoms);
        let conditions = clean(conditions);
        if symptoms.is_empty() && conditions.is_empty() {
            return Err(CommandError::MissingArgument(
                "at least one of --symptoms or --conditions".to_string(),
            )
            .into());
        }

        let patient = patient
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PATIENT)
            .to_string();

        Ok(Self {
            patient,
            symptoms,
            conditions,
        })
    }

    /// Name used to address the patient.
    #[must_use]
    pub fn patient(&self) -> &str {
        &self.patient
    }
}

fn clean(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        NONE_REPORTED.to_string()
    } else {
        items.join(", ")
    }
}

impl Agent for DietPlanner {
    fn name(&self) -> &'static str {
        "diet"
    }

    fn area(&self) -> Option<FeatureArea> {
        Some(FeatureArea::Assistant)
    }

    fn prompt(&self, prompts: &PromptSet) -> Prompt {
        Prompt::user(format!(
            "Make a diet plan for patient {}.\n\
             The symptoms are: {}.\n\
             The conditions are: {}.\n\n\
             Give the diet plan, food list, and at least 3 Veg recipes and 3 Non-Veg recipes.",
            self.patient,
            list_or_none(&self.symptoms),
            list_or_none(&self.conditions)
        ))
        .with_system(prompts.diet.as_str())
        .with_temperature(DIET_TEMPERATURE)
    }

    fn output_buffers(&self) -> Vec<&'static str> {
        vec![DIET_OUTPUT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_requires_symptom_or_condition() {
        assert!(DietPlanner::new(Some("Asha"), &[], &strings(&["  "])).is_err());
        assert!(DietPlanner::new(Some("Asha"), &[], &strings(&["anemia"])).is_ok());
    }

    #[test]
    fn test_blank_name_uses_default() {
        let planner = DietPlanner::new(Some("  "), &strings(&["fatigue"]), &[]).unwrap();
        assert_eq!(planner.patient(), "the patient");
    }

    #[test]
    fn test_prompt_shape() {
        let planner =
            DietPlanner::new(Some("Asha"), &strings(&["fatigue", " thirst "]), &[]).unwrap();
        let prompt = planner.prompt(&PromptSet::defaults());
        assert!(prompt.user.starts_with("Make a diet plan for patient Asha.\n"));
        assert!(prompt.user.contains("The symptoms are: fatigue, thirst.\n"));
        assert!(prompt.user.contains("The conditions are: none reported.\n"));
        assert_eq!(prompt.temperature, Some(DIET_TEMPERATURE));
        assert!(prompt.system.unwrap().contains("beef or pork"));
        assert_eq!(planner.output_buffers(), vec![DIET_OUTPUT]);
        assert_eq!(planner.area(), Some(FeatureArea::Assistant));
    }
}
