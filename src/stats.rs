//! Dashboard aggregates over the case list. Pure, no I/O.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::store::{CaseRecord, CaseStatus};

/// complexity_score above this counts as a high-risk case.
const HIGH_RISK_COMPLEXITY: u32 = 75;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseStatistics {
    pub total_cases: usize,
    pub cases_by_status: BTreeMap<String, usize>,
    pub cases_by_practice_area: BTreeMap<String, usize>,
    pub cases_by_jurisdiction: BTreeMap<String, usize>,
    pub total_value: f64,
    pub active_cases: usize,
    pub high_risk_cases: usize,
    pub average_complexity: f64,
    pub total_time_spent: f64,
    /// Closed cases as a percentage of all cases.
    pub success_rate: f64,
}

fn label_or_unknown(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        "Unknown".to_string()
    } else {
        s.to_string()
    }
}

impl CaseStatistics {
    pub fn from_cases(cases: &[CaseRecord]) -> Self {
        let mut stats = Self {
            total_cases: cases.len(),
            ..Self::default()
        };
        if cases.is_empty() {
            return stats;
        }

        let mut complexity_sum: u64 = 0;
        let mut closed = 0usize;

        for case in cases {
            *stats
                .cases_by_status
                .entry(case.status.to_string())
                .or_default() += 1;
            *stats
                .cases_by_practice_area
                .entry(label_or_unknown(&case.practice_area))
                .or_default() += 1;
            *stats
                .cases_by_jurisdiction
                .entry(label_or_unknown(&case.jurisdiction))
                .or_default() += 1;

            stats.total_value += case.matter_value;
            stats.total_time_spent += case.time_spent;
            if case.status.is_in_progress() {
                stats.active_cases += 1;
            }
            if case.complexity_score > HIGH_RISK_COMPLEXITY {
                stats.high_risk_cases += 1;
            }
            if case.status == CaseStatus::Closed {
                closed += 1;
            }
            complexity_sum += u64::from(case.complexity_score);
        }

        let n = cases.len() as f64;
        stats.average_complexity = complexity_sum as f64 / n;
        stats.success_rate = closed as f64 / n * 100.0;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(status: CaseStatus, area: &str, value: f64, complexity: u32) -> CaseRecord {
        let mut c = CaseRecord::new("Client", "c@example.com");
        c.status = status;
        c.practice_area = area.to_string();
        c.matter_value = value;
        c.complexity_score = complexity;
        c
    }

    #[test]
    fn empty_is_all_zero() {
        let s = CaseStatistics::from_cases(&[]);
        assert_eq!(s, CaseStatistics::default());
    }

    #[test]
    fn aggregates() {
        let mut closed = case(CaseStatus::Closed, "Litigation", 1_000.0, 40);
        closed.jurisdiction = "USA".into();
        closed.time_spent = 2.5;
        let cases = vec![
            case(CaseStatus::Active, "Litigation", 250_000.0, 80),
            case(CaseStatus::Review, "", 10_000.0, 60),
            case(CaseStatus::Intake, "Real Estate", 0.0, 76),
            closed,
        ];
        let s = CaseStatistics::from_cases(&cases);
        assert_eq!(s.total_cases, 4);
        assert_eq!(s.active_cases, 2);
        assert_eq!(s.high_risk_cases, 2);
        assert_eq!(s.cases_by_practice_area["Litigation"], 2);
        assert_eq!(s.cases_by_practice_area["Unknown"], 1);
        assert_eq!(s.cases_by_jurisdiction["Unknown"], 3);
        assert_eq!(s.cases_by_status["Closed"], 1);
        assert!((s.total_value - 261_000.0).abs() < 1e-9);
        assert!((s.average_complexity - 64.0).abs() < 1e-9);
        assert!((s.success_rate - 25.0).abs() < 1e-9);
        assert!((s.total_time_spent - 2.5).abs() < 1e-9);
    }
}
