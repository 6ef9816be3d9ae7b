// src/analyze/mod.rs
//! Matter analysis pipeline: a deterministic rule engine over free text.
//!
//! Order:
//! 1) classify (declared category, else keyword scoring)
//! 2) priority (urgency table + urgent-phrase escalation)
//! 3) complexity
//! 4) practice area / specialist (keyed by the keyword-inferred category)
//! 5) issues, duration, similar-case placeholder, next steps, risks, confidence
//!
//! Every step is total. Missing signal degrades to sentinel values.

pub mod classify;
pub mod complexity;
pub mod duration;
pub mod issues;
pub mod priority;
pub mod scoring;
pub mod steps;
pub mod tables;

use chrono::Utc;
use metrics::counter;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

use crate::logging::{anon_hash, truncate_vec};
use crate::matter::{AnalysisResult, MatterInput};

// Re-export convenient items.
pub use crate::analyze::classify::{classify, infer_category, GENERAL_LEGAL_MATTER};
pub use crate::analyze::complexity::{assess_complexity, ComplexityFactors};
pub use crate::analyze::duration::estimate_duration;
pub use crate::analyze::issues::{extract_issues, identify_risks};
pub use crate::analyze::priority::resolve_priority;
pub use crate::analyze::scoring::{score_confidence, simulated_similar_case_count};
pub use crate::analyze::steps::generate_next_steps;
pub use crate::analyze::tables::{CategoryEntry, LookupTables};

/// Stateless apart from its read-only lookup tables; cheap to clone and share.
#[derive(Debug, Clone)]
pub struct MatterAnalyzer {
    tables: Arc<LookupTables>,
}

impl MatterAnalyzer {
    pub fn new(tables: Arc<LookupTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn analyze(&self, input: &MatterInput) -> AnalysisResult {
        let description = input.description.as_str();
        let lower = description.to_lowercase();
        let urgency = input.declared_urgency;

        let classification = classify(&self.tables, &lower, input.declared_category.as_deref());
        let priority = resolve_priority(urgency, &lower);
        let complexity = assess_complexity(description);

        let inferred = classify::inferred_label(&self.tables, &lower);
        let practice_area = self.tables.practice_area(&inferred).to_string();
        let recommended_specialist = self.tables.recommend_specialist(&inferred).to_string();

        let key_issues = extract_issues(&lower);
        let estimated_duration = estimate_duration(complexity, urgency).to_string();
        let similar_case_count = simulated_similar_case_count(&lower);
        let next_steps = generate_next_steps(&lower, urgency);
        let risk_factors = identify_risks(&lower);
        let confidence = score_confidence(description);

        debug!(
            target: "matter",
            id = %anon_hash(description),
            %classification,
            %priority,
            %complexity,
            confidence,
            issues = ?truncate_vec(&key_issues, 5),
            "matter analyzed"
        );
        counter!("matter_analyses_total", "priority" => priority.as_str()).increment(1);

        AnalysisResult {
            classification,
            priority,
            complexity,
            practice_area,
            recommended_specialist,
            key_issues,
            estimated_duration,
            similar_case_count,
            next_steps,
            risk_factors,
            confidence,
            analysis_timestamp: Utc::now(),
        }
    }
}

impl Default for MatterAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(LookupTables::builtin()))
    }
}

static DEFAULT_ANALYZER: Lazy<MatterAnalyzer> = Lazy::new(MatterAnalyzer::default);

/// Convenience entry with the built-in tables and raw form strings.
/// Blank `declared_category` means "not supplied"; unknown urgency labels are tolerated.
pub fn analyze_matter(
    description: &str,
    declared_category: &str,
    declared_urgency: &str,
) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(&MatterInput::from_form(
        description,
        declared_category,
        declared_urgency,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::{Complexity, Priority};

    #[test]
    fn practice_area_ignores_declared_category() {
        let r = analyze_matter("my landlord kept the deposit", "Employment", "Urgent");
        assert_eq!(r.classification, "Employment");
        assert_eq!(r.practice_area, "Real Estate Law");
        assert_eq!(r.recommended_specialist, "Attorney Wilson (Property Law)");
    }

    #[test]
    fn multiword_categories_resolve_specialist() {
        let r = analyze_matter("someone copied our patent and trademark", "", "Not Urgent");
        assert_eq!(r.classification, "Intellectual Property");
        assert_eq!(r.practice_area, "Intellectual Property Law");
        assert_eq!(r.recommended_specialist, "Attorney Davis (IP Law)");
    }

    #[test]
    fn custom_tables_are_used() {
        let tables = LookupTables::from_toml_str(
            r#"
            [[category]]
            key = "tax"
            keywords = ["irs", "audit"]
            practice_area = "Tax Law"
            specialist = "Attorney Lee (Tax)"
            "#,
        )
        .unwrap();
        let a = MatterAnalyzer::new(Arc::new(tables));
        let r = a.analyze(&MatterInput::from_form("The IRS opened an audit", "", "Urgent"));
        assert_eq!(r.classification, "Tax");
        assert_eq!(r.practice_area, "Tax Law");
        assert_eq!(r.priority, Priority::High);
        assert_eq!(r.complexity, Complexity::Low);
    }
}
