//! Feature areas and the buffer names they own.
//!
//! Each user-facing activity writes its outputs into named session buffers.
//! The table here decides which of those names the context selector consults
//! first for a given area.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shared catch-all buffer, checked last for every area.
pub const LATEST_OUTPUT: &str = "latest_output";

/// Buffer written by the report analysis agent.
pub const REPORT_SUMMARY: &str = "report_summary";

/// Buffer written by the tablet description agent.
pub const TABLET_OUTPUT: &str = "tablet_output";

/// Buffer holding the cleaned label text the tablet agent was given.
pub const OCR_TEXT: &str = "ocr_text";

/// Buffer written by the diet planning agent.
pub const DIET_OUTPUT: &str = "diet_output";

/// Session identity keys. Never treated as content.
pub const RESERVED_KEYS: [&str; 3] = ["logged_in", "name", "email"];

const ASSISTANT_BUFFERS: &[&str] = &[
    "diagnosis_output",
    DIET_OUTPUT,
    "routine_output",
    "assistant_output",
    "assistant_result",
    "generated_text",
    LATEST_OUTPUT,
];

const TABLET_BUFFERS: &[&str] = &[
    TABLET_OUTPUT,
    "pill_identification",
    OCR_TEXT,
    "tablet_result",
    "meds_summary",
    LATEST_OUTPUT,
];

const REPORT_BUFFERS: &[&str] = &[
    REPORT_SUMMARY,
    "report_output",
    "analysis_output",
    "report_result",
    LATEST_OUTPUT,
];

const PROFILE_BUFFERS: &[&str] = &[
    "profile_output",
    "medical_history",
    "allergies",
    "profile_changes",
    LATEST_OUTPUT,
];

/// A user-facing activity that produces buffers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FeatureArea {
    /// Diagnosis, diet and routine assistant.
    Assistant,
    /// Tablet strip analyzer.
    Tablet,
    /// Medical report analyzer.
    Report,
    /// Profile editor.
    Profile,
}

impl FeatureArea {
    /// All areas in display order.
    pub const ALL: [Self; 4] = [Self::Assistant, Self::Tablet, Self::Report, Self::Profile];

    /// Preferred buffer names for this area, in lookup order.
    ///
    /// The last entry is always [`LATEST_OUTPUT`].
    #[must_use]
    pub const fn preferred_buffers(self) -> &'static [&'static str] {
        match self {
            Self::Assistant => ASSISTANT_BUFFERS,
            Self::Tablet => TABLET_BUFFERS,
            Self::Report => REPORT_BUFFERS,
            Self::Profile => PROFILE_BUFFERS,
        }
    }

    /// Lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Tablet => "tablet",
            Self::Report => "report",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for FeatureArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assistant" => Ok(Self::Assistant),
            "tablet" => Ok(Self::Tablet),
            "report" => Ok(Self::Report),
            "profile" => Ok(Self::Profile),
            other => Err(format!("unknown feature area: {other}")),
        }
    }
}

/// Returns `true` if `name` is one of the session identity keys.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_area_ends_with_catch_all() {
        for area in FeatureArea::ALL {
            assert_eq!(area.preferred_buffers().last(), Some(&LATEST_OUTPUT));
        }
    }

    #[test]
    fn test_area_round_trip_names() {
        for area in FeatureArea::ALL {
            assert_eq!(area.as_str().parse::<FeatureArea>(), Ok(area));
        }
        assert_eq!("REPORT".parse::<FeatureArea>(), Ok(FeatureArea::Report));
        assert!("calendar".parse::<FeatureArea>().is_err());
    }

    #[test]
    fn test_primary_buffers() {
        assert_eq!(
            FeatureArea::Assistant.preferred_buffers()[0],
            "diagnosis_output"
        );
        assert_eq!(FeatureArea::Tablet.preferred_buffers()[0], TABLET_OUTPUT);
        assert_eq!(FeatureArea::Report.preferred_buffers()[0], REPORT_SUMMARY);
        assert_eq!(FeatureArea::Profile.preferred_buffers()[0], "profile_output");
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved("logged_in"));
        assert!(is_reserved("name"));
        assert!(is_reserved("email"));
        assert!(!is_reserved("report_summary"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FeatureArea::Tablet).unwrap();
        assert_eq!(json, "\"tablet\"");
    }
}
