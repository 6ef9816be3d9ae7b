//! Issue and risk tagging from fixed, ordered regex banks.
//!
//! Output order is bank order, never order of appearance in the text. Both
//! extractors are total: when nothing matches they return a single sentinel tag.

use once_cell::sync::Lazy;
use regex::Regex;

pub const GENERAL_CONSULTATION: &str = "General Legal Consultation";
pub const STANDARD_RISK: &str = "Standard risk profile";

pub const RISK_FINANCIAL: &str = "High financial exposure";
pub const RISK_LITIGATION: &str = "Active litigation involvement";
pub const RISK_MULTIPLE_ISSUES: &str = "Multiple complex legal issues";

fn compile_bank(bank: &[(&'static str, &str)]) -> Vec<(&'static str, Regex)> {
    bank.iter()
        .map(|(tag, pattern)| {
            let re = Regex::new(pattern).unwrap_or_else(|e| panic!("issue bank `{tag}`: {e}"));
            (*tag, re)
        })
        .collect()
}

static ISSUE_BANK: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    compile_bank(&[
        ("Contract Breach", r"(?i)breach|violat|fail to perform|non.?performance"),
        ("Payment Dispute", r"(?i)payment|money owed|unpaid|fee dispute"),
        ("Intellectual Property", r"(?i)infringement|unauthorized use|copy right|trade secret"),
        ("Employment Issue", r"(?i)discriminat|harassment|wrongful termination|wage claim"),
        ("Regulatory Compliance", r"(?i)compliance|regulation|violation|penalty|fine"),
        ("Liability", r"(?i)liable|liability|negligence|damages"),
        ("Contract Interpretation", r"(?i)interpret|meaning|ambiguous|unclear terms"),
    ])
});

/// `$` followed by 5+ digits/commas, or 6+ digits followed by "dollar(s)".
static LARGE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[0-9,]{5,}|[0-9]{6,} dollars?").expect("large amount regex"));

static LITIGATION_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(court|judge|lawsuit|litigation|sue|sued|suing)\b")
        .expect("litigation regex")
});

/// Issue tags without the sentinel fallback (may be empty).
pub fn matched_issues(description: &str) -> Vec<String> {
    ISSUE_BANK
        .iter()
        .filter(|(_, re)| re.is_match(description))
        .map(|(tag, _)| tag.to_string())
        .collect()
}

pub fn extract_issues(description: &str) -> Vec<String> {
    let issues = matched_issues(description);
    if issues.is_empty() {
        vec![GENERAL_CONSULTATION.to_string()]
    } else {
        issues
    }
}

pub fn identify_risks(description: &str) -> Vec<String> {
    let mut risks = Vec::new();

    if LARGE_AMOUNT.is_match(description) {
        risks.push(RISK_FINANCIAL.to_string());
    }
    if LITIGATION_TERMS.is_match(description) {
        risks.push(RISK_LITIGATION.to_string());
    }
    if matched_issues(description).len() > 2 {
        risks.push(RISK_MULTIPLE_ISSUES.to_string());
    }

    if risks.is_empty() {
        vec![STANDARD_RISK.to_string()]
    } else {
        risks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gets_sentinels() {
        assert_eq!(extract_issues(""), [GENERAL_CONSULTATION]);
        assert_eq!(identify_risks(""), [STANDARD_RISK]);
    }

    #[test]
    fn issues_follow_bank_order() {
        // Liability mentioned first in the text, breach later.
        let d = "They are liable for negligence after the breach and unpaid invoices.";
        assert_eq!(
            extract_issues(d),
            ["Contract Breach", "Payment Dispute", "Liability"]
        );
    }

    #[test]
    fn case_insensitive_issue_patterns() {
        assert_eq!(extract_issues("TRADE SECRET theft"), ["Intellectual Property"]);
        assert_eq!(extract_issues("Non-Performance of duties"), ["Contract Breach"]);
    }

    #[test]
    fn fine_also_hits_inside_words() {
        // Same substring behaviour as the other patterns: "define" contains "fine".
        assert_eq!(extract_issues("please define the scope"), ["Regulatory Compliance"]);
    }

    #[test]
    fn risk_checks() {
        let d = "owed $1,250,000 and the judge set a hearing; breach, unpaid, liable";
        assert_eq!(
            identify_risks(d),
            [RISK_FINANCIAL, RISK_LITIGATION, RISK_MULTIPLE_ISSUES]
        );

        assert_eq!(identify_risks("claim of 1500000 dollars"), [RISK_FINANCIAL]);
        assert_eq!(identify_risks("only $500 owed"), [STANDARD_RISK]);
        assert_eq!(identify_risks("we may need to sue"), [RISK_LITIGATION]);
        // word boundary: "courteous" is not "court"
        assert_eq!(identify_risks("a courteous letter"), [STANDARD_RISK]);
    }

    #[test]
    fn two_issues_are_not_multiple_complex() {
        let risks = identify_risks("breach and unpaid");
        assert_eq!(risks, [STANDARD_RISK]);
    }
}
