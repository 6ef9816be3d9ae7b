//! Duration estimate from a fixed (complexity, urgency band) table.

use crate::matter::{Complexity, Urgency, UrgencyBand};

/// Fallback for any pair missing from the table.
pub const DEFAULT_DURATION: &str = "2-4 weeks";

pub const DURATION_TABLE: [((Complexity, UrgencyBand), &str); 9] = [
    ((Complexity::Low, UrgencyBand::Low), "1-2 weeks"),
    ((Complexity::Low, UrgencyBand::Medium), "2-4 weeks"),
    ((Complexity::Low, UrgencyBand::High), "3-6 weeks"),
    ((Complexity::Medium, UrgencyBand::Low), "3-6 weeks"),
    ((Complexity::Medium, UrgencyBand::Medium), "1-3 months"),
    ((Complexity::Medium, UrgencyBand::High), "2-4 months"),
    ((Complexity::High, UrgencyBand::Low), "2-4 months"),
    ((Complexity::High, UrgencyBand::Medium), "3-6 months"),
    ((Complexity::High, UrgencyBand::High), "4-8 months"),
];

pub fn estimate_duration(complexity: Complexity, urgency: Option<Urgency>) -> &'static str {
    let key = (complexity, UrgencyBand::of(urgency));
    DURATION_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, d)| *d)
        .unwrap_or(DEFAULT_DURATION)
}
