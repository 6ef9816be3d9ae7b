//! Complexity heuristic: length, sentence count and a few legal-text factors.
//!
//! The legal-term and party counters are raw occurrence counts and are not
//! clamped, so heavy legalese alone can reach `High`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::issues::extract_issues;
use crate::matter::Complexity;

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));
static LEGAL_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(wherein|hereinafter|pursuant|whereas)\b").expect("legal terms regex")
});
static PARTIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(party|parties|defendant|plaintiff)\b").expect("parties regex")
});
static MONETARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[\d,]+|\d+ dollars?").expect("monetary regex"));

const HIGH_ABOVE: f64 = 3.0;
const MEDIUM_ABOVE: f64 = 1.5;

/// Individual inputs of the complexity score, kept for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityFactors {
    pub word_count: usize,
    pub sentence_count: usize,
    pub legal_terms: usize,
    pub parties: usize,
    pub monetary: bool,
    pub multiple_issues: bool,
}

impl ComplexityFactors {
    pub fn of(description: &str) -> Self {
        Self {
            word_count: word_count(description),
            sentence_count: sentence_count(description),
            legal_terms: LEGAL_TERMS.find_iter(description).count(),
            parties: PARTIES.find_iter(description).count(),
            monetary: MONETARY.is_match(description),
            multiple_issues: extract_issues(description).len() > 1,
        }
    }

    pub fn score(&self) -> f64 {
        (self.word_count as f64 / 100.0).min(1.0)
            + (self.sentence_count as f64 / 5.0).min(1.0)
            + self.legal_terms as f64
            + self.parties as f64
            + f64::from(u8::from(self.monetary))
            + f64::from(u8::from(self.multiple_issues))
    }

    pub fn level(&self) -> Complexity {
        let score = self.score();
        if score > HIGH_ABOVE {
            Complexity::High
        } else if score > MEDIUM_ABOVE {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Pieces between runs of `.`, `!`, `?`, empty leading/trailing pieces included.
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_SPLIT.split(text).count()
}

pub fn assess_complexity(description: &str) -> Complexity {
    ComplexityFactors::of(description).level()
}
