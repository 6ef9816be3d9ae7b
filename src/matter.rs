//! matter.rs: Input and output shapes of the matter classifier.
//!
//! `MatterInput` is built per call; `AnalysisResult` is produced fresh by every
//! analysis and never mutated afterwards. Both serialize to the JSON the intake
//! API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared urgency of a matter, as picked on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "Not Urgent")]
    NotUrgent,
    #[serde(rename = "Somewhat Urgent")]
    SomewhatUrgent,
    #[serde(rename = "Urgent")]
    Urgent,
    #[serde(rename = "Very Urgent")]
    VeryUrgent,
    #[serde(rename = "Emergency")]
    Emergency,
}

impl Urgency {
    pub const ALL: [Urgency; 5] = [
        Urgency::NotUrgent,
        Urgency::SomewhatUrgent,
        Urgency::Urgent,
        Urgency::VeryUrgent,
        Urgency::Emergency,
    ];

    /// Parse a form label. Case-insensitive; space, `_` and `-` are interchangeable.
    /// Anything else is unrecognized (`None`).
    pub fn from_label(label: &str) -> Option<Self> {
        let norm: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match norm.as_str() {
            "noturgent" => Some(Self::NotUrgent),
            "somewhaturgent" => Some(Self::SomewhatUrgent),
            "urgent" => Some(Self::Urgent),
            "veryurgent" => Some(Self::VeryUrgent),
            "emergency" => Some(Self::Emergency),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotUrgent => "Not Urgent",
            Self::SomewhatUrgent => "Somewhat Urgent",
            Self::Urgent => "Urgent",
            Self::VeryUrgent => "Very Urgent",
            Self::Emergency => "Emergency",
        }
    }
}

/// Coarse collapse of `Urgency` used for table lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UrgencyBand {
    Low,
    Medium,
    High,
}

impl UrgencyBand {
    /// Urgent / Very Urgent / Emergency → High; Somewhat Urgent → Medium; the rest → Low.
    pub fn of(urgency: Option<Urgency>) -> Self {
        match urgency {
            Some(Urgency::Urgent | Urgency::VeryUrgent | Urgency::Emergency) => Self::High,
            Some(Urgency::SomewhatUrgent) => Self::Medium,
            Some(Urgency::NotUrgent) | None => Self::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatterInput {
    pub description: String,
    /// Category picked on the form; `None` (or "Other") lets keyword scoring decide.
    pub declared_category: Option<String>,
    /// `None` when the form label was not recognized.
    pub declared_urgency: Option<Urgency>,
}

impl MatterInput {
    /// Build from raw form strings. Blank category means "not supplied".
    pub fn from_form(description: &str, declared_category: &str, declared_urgency: &str) -> Self {
        let category = declared_category.trim();
        Self {
            description: description.to_string(),
            declared_category: (!category.is_empty()).then(|| declared_category.to_string()),
            declared_urgency: Urgency::from_label(declared_urgency),
        }
    }
}

/// Structured bundle of derived attributes for one matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: String,
    pub priority: Priority,
    pub complexity: Complexity,
    pub practice_area: String,
    pub recommended_specialist: String,
    /// Never empty ("General Legal Consultation" when nothing matched).
    pub key_issues: Vec<String>,
    pub estimated_duration: String,
    /// Placeholder figure in [0, 25]; not backed by any case search.
    pub similar_case_count: u32,
    pub next_steps: Vec<String>,
    /// Never empty ("Standard risk profile" when nothing matched).
    pub risk_factors: Vec<String>,
    /// Placeholder figure in [80, 95].
    pub confidence: u32,
    pub analysis_timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_labels_parse_leniently() {
        assert_eq!(Urgency::from_label("Not Urgent"), Some(Urgency::NotUrgent));
        assert_eq!(Urgency::from_label("very_urgent"), Some(Urgency::VeryUrgent));
        assert_eq!(Urgency::from_label(" somewhat-URGENT "), Some(Urgency::SomewhatUrgent));
        assert_eq!(Urgency::from_label("High"), None);
        assert_eq!(Urgency::from_label(""), None);
        for u in Urgency::ALL {
            assert_eq!(Urgency::from_label(u.label()), Some(u));
        }
    }

    #[test]
    fn bands_collapse_as_expected() {
        assert_eq!(UrgencyBand::of(Some(Urgency::Emergency)), UrgencyBand::High);
        assert_eq!(UrgencyBand::of(Some(Urgency::Urgent)), UrgencyBand::High);
        assert_eq!(UrgencyBand::of(Some(Urgency::SomewhatUrgent)), UrgencyBand::Medium);
        assert_eq!(UrgencyBand::of(Some(Urgency::NotUrgent)), UrgencyBand::Low);
        assert_eq!(UrgencyBand::of(None), UrgencyBand::Low);
    }

    #[test]
    fn blank_category_is_not_supplied() {
        let m = MatterInput::from_form("x", "   ", "Urgent");
        assert_eq!(m.declared_category, None);
        assert_eq!(m.declared_urgency, Some(Urgency::Urgent));

        let m = MatterInput::from_form("x", "Employment", "whenever");
        assert_eq!(m.declared_category.as_deref(), Some("Employment"));
        assert_eq!(m.declared_urgency, None);
    }

    #[test]
    fn priority_serializes_as_plain_label() {
        let v = serde_json::to_value(Priority::Critical).unwrap();
        assert_eq!(v, serde_json::json!("Critical"));
        let v = serde_json::to_value(Urgency::VeryUrgent).unwrap();
        assert_eq!(v, serde_json::json!("Very Urgent"));
    }
}
