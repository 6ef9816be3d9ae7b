//! Presentation-only figures: confidence and "similar cases".
//!
//! Neither number is backed by data. They are placeholder heuristics kept so
//! the intake screens have something to show; do not read them as analytics.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::complexity::word_count;

pub const CONFIDENCE_FLOOR: u32 = 80;
pub const CONFIDENCE_CAP: u32 = 95;
pub const SIMILAR_CASES_CAP: u32 = 25;

static CORE_LEGAL_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(contract|agreement|liable|breach|dispute|claim)\b")
        .expect("core legal terms regex")
});
static LONG_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("long word regex"));

/// Placeholder confidence: 80 + words/10 + 5 per core legal term, capped at 95.
/// Empty input still yields 80.
pub fn score_confidence(description: &str) -> u32 {
    let words = word_count(description) as u64;
    let terms = CORE_LEGAL_TERMS.find_iter(description).count() as u64;
    let raw = u64::from(CONFIDENCE_FLOOR) + words / 10 + terms * 5;
    raw.min(u64::from(CONFIDENCE_CAP)) as u32
}

/// Placeholder "similar cases" figure: distinct lower-case words of 4+ letters,
/// doubled, capped at 25. No search happens.
pub fn simulated_similar_case_count(description_lower: &str) -> u32 {
    let unique: HashSet<&str> = LONG_WORD
        .find_iter(description_lower)
        .map(|m| m.as_str())
        .collect();
    (unique.len().saturating_mul(2)).min(SIMILAR_CASES_CAP as usize) as u32
}
