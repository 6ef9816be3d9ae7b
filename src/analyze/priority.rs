//! Priority from declared urgency plus urgent-phrase escalation.

use crate::matter::{Priority, Urgency};

/// Phrases that push a matter up the queue (presence only, each counted once).
pub const URGENT_INDICATORS: [&str; 10] = [
    "deadline",
    "court date",
    "filing deadline",
    "expire",
    "immediately",
    "emergency",
    "urgent",
    "asap",
    "time-sensitive",
    "lawsuit filed",
];

/// Fixed urgency → priority table; unrecognized urgency is Medium.
pub fn base_priority(urgency: Option<Urgency>) -> Priority {
    match urgency {
        Some(Urgency::NotUrgent) => Priority::Low,
        Some(Urgency::SomewhatUrgent) => Priority::Medium,
        Some(Urgency::Urgent) => Priority::High,
        Some(Urgency::VeryUrgent | Urgency::Emergency) => Priority::Critical,
        None => Priority::Medium,
    }
}

pub fn urgent_indicator_count(description_lower: &str) -> usize {
    URGENT_INDICATORS
        .iter()
        .filter(|p| description_lower.contains(*p))
        .count()
}

/// Three or more indicators → Critical; two lift Low/Medium to High.
pub fn resolve_priority(urgency: Option<Urgency>, description_lower: &str) -> Priority {
    let base = base_priority(urgency);
    let hits = urgent_indicator_count(description_lower);

    if hits >= 3 {
        Priority::Critical
    } else if hits >= 2 && matches!(base, Priority::Low | Priority::Medium) {
        Priority::High
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_table() {
        assert_eq!(resolve_priority(Some(Urgency::NotUrgent), ""), Priority::Low);
        assert_eq!(resolve_priority(Some(Urgency::SomewhatUrgent), ""), Priority::Medium);
        assert_eq!(resolve_priority(Some(Urgency::Urgent), ""), Priority::High);
        assert_eq!(resolve_priority(Some(Urgency::VeryUrgent), ""), Priority::Critical);
        assert_eq!(resolve_priority(Some(Urgency::Emergency), ""), Priority::Critical);
        assert_eq!(resolve_priority(None, ""), Priority::Medium);
    }

    #[test]
    fn one_indicator_changes_nothing() {
        assert_eq!(
            resolve_priority(Some(Urgency::NotUrgent), "there is a deadline"),
            Priority::Low
        );
    }

    #[test]
    fn two_indicators_lift_low_to_high() {
        let d = "respond asap, the offer will expire";
        assert_eq!(urgent_indicator_count(d), 2);
        assert_eq!(resolve_priority(Some(Urgency::NotUrgent), d), Priority::High);
        assert_eq!(resolve_priority(Some(Urgency::VeryUrgent), d), Priority::Critical);
    }

    #[test]
    fn three_indicators_always_critical() {
        // "filing deadline" also contains "deadline": that alone is two hits.
        let d = "filing deadline passes immediately";
        assert_eq!(urgent_indicator_count(d), 3);
        assert_eq!(resolve_priority(Some(Urgency::NotUrgent), d), Priority::Critical);
    }

    #[test]
    fn repeated_phrase_counts_once() {
        assert_eq!(urgent_indicator_count("asap asap asap"), 1);
    }
}
