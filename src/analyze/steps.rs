//! Next-step checklist for a freshly classified matter.

use crate::matter::{Urgency, UrgencyBand};

const BASE_STEPS: [&str; 3] = [
    "Initial conflict check and case opening",
    "Client engagement agreement preparation",
    "First attorney review and strategy session",
];

pub fn generate_next_steps(description_lower: &str, urgency: Option<Urgency>) -> Vec<String> {
    let mut steps: Vec<String> = BASE_STEPS.iter().map(|s| s.to_string()).collect();

    if UrgencyBand::of(urgency) == UrgencyBand::High {
        steps.insert(0, "Immediate senior attorney review".to_string());
        steps.push("Expedited document collection".to_string());
    }

    if description_lower.contains("contract") {
        steps.push("Contract analysis and gap identification".to_string());
        steps.push("Remedy assessment and strategy development".to_string());
    }

    if description_lower.contains("dispute") || description_lower.contains("conflict") {
        steps.push("Dispute resolution strategy session".to_string());
        steps.push("Settlement opportunity assessment".to_string());
    }

    steps
}
