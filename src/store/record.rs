//! record.rs: Persisted case shape.
//!
//! Every field has a default so older or hand-edited files still load. A case
//! stored without an id (or with a blank one) gets an id from `fill_defaults`,
//! which the store writes back so the id stays stable.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::matter::AnalysisResult;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `LAW-<unix seconds>-<6 upper-case alphanumerics>`.
pub fn generate_case_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("LAW-{}-{}", Utc::now().timestamp(), suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CaseStatus {
    #[default]
    Intake,
    Review,
    Accepted,
    Active,
    Closed,
    Declined,
    #[serde(rename = "On Hold", alias = "OnHold")]
    OnHold,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::Review => "Review",
            Self::Accepted => "Accepted",
            Self::Active => "Active",
            Self::Closed => "Closed",
            Self::Declined => "Declined",
            Self::OnHold => "On Hold",
        }
    }

    /// Counted as "active" on the dashboard.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Active | Self::Accepted | Self::Review)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: CaseStatus,
    pub to: CaseStatus,
    pub at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Rate used when a time entry does not name one.
pub const DEFAULT_HOURLY_RATE: f64 = 250.0;

pub const SYSTEM_AUTHOR: &str = "System";
pub const GENERAL_NOTE: &str = "general";
pub const STATUS_CHANGE_NOTE: &str = "status_change";

const UNKNOWN_CLIENT: &str = "Unknown Client";

fn unknown_client() -> String {
    UNKNOWN_CLIENT.to_string()
}

fn system_author() -> String {
    SYSTEM_AUTHOR.to_string()
}

fn general_note() -> String {
    GENERAL_NOTE.to_string()
}

fn default_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

/// Billable work logged against a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub case_id: String,
    /// When the work was done.
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// hours × rate
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "system_author")]
    pub user: String,
    #[serde(default)]
    pub billed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    pub fn new(
        case_id: impl Into<String>,
        task_description: impl Into<String>,
        hours: f64,
        rate: f64,
        date: Option<DateTime<Utc>>,
        user: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            case_id: case_id.into(),
            date: date.unwrap_or(now),
            task_description: task_description.into(),
            hours,
            rate,
            amount: hours * rate,
            user: user.into(),
            billed: false,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseNote {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub case_id: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default = "system_author")]
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "general_note", rename = "type")]
    pub note_type: String,
    #[serde(default)]
    pub case_status_at_time: CaseStatus,
}

fn default_complexity_score() -> u32 {
    50
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(default)]
    pub case_id: String,
    #[serde(default = "unknown_client")]
    pub client_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub practice_area: String,
    #[serde(default)]
    pub case_type: String,
    #[serde(default)]
    pub matter_value: f64,
    #[serde(default)]
    pub jurisdiction: String,
    /// Urgency label as entered on the form.
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CaseStatus,
    /// 0..=100; above 75 counts as high risk.
    #[serde(default = "default_complexity_score")]
    pub complexity_score: u32,
    /// Hours logged through `log_time`.
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default)]
    pub billed_amount: f64,
    #[serde(default = "Utc::now")]
    pub intake_date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_history: Vec<StatusChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_entries: Vec<TimeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<CaseNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

/// Fill blank ids and client names. Returns whether anything changed.
pub fn fill_case_defaults(cases: &mut [CaseRecord]) -> bool {
    cases
        .iter_mut()
        .fold(false, |changed, c| c.fill_defaults() | changed)
}

impl CaseRecord {
    /// New Intake case with a generated id.
    pub fn new(client_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            case_id: generate_case_id(),
            client_name: client_name.into(),
            email: email.into(),
            company_name: String::new(),
            practice_area: String::new(),
            case_type: String::new(),
            matter_value: 0.0,
            jurisdiction: String::new(),
            urgency: String::new(),
            description: String::new(),
            status: CaseStatus::Intake,
            complexity_score: default_complexity_score(),
            time_spent: 0.0,
            billed_amount: 0.0,
            intake_date: now,
            last_updated: now,
            status_history: Vec::new(),
            time_entries: Vec::new(),
            notes: Vec::new(),
            analysis: None,
        }
    }

    /// Generate a missing id, name an unnamed client. Returns whether anything changed.
    pub fn fill_defaults(&mut self) -> bool {
        let mut changed = false;
        if self.case_id.trim().is_empty() {
            self.case_id = generate_case_id();
            changed = true;
        }
        if self.client_name.trim().is_empty() {
            self.client_name = unknown_client();
            changed = true;
        }
        changed
    }

    /// Move to `to`, recording the transition and a system note.
    pub fn transition(&mut self, to: CaseStatus, notes: Option<String>) {
        let now = Utc::now();
        let content = match notes.as_deref() {
            Some(n) => format!("Status changed from {} to {to}: {n}", self.status),
            None => format!("Status changed from {} to {to}", self.status),
        };
        self.status_history.push(StatusChange {
            from: self.status,
            to,
            at: now,
            notes,
        });
        self.status = to;
        self.last_updated = now;
        self.add_note(content, SYSTEM_AUTHOR, STATUS_CHANGE_NOTE);
    }

    /// Log work; `time_spent` and `billed_amount` follow the entry.
    pub fn log_time(&mut self, mut entry: TimeEntry) -> TimeEntry {
        entry.case_id = self.case_id.clone();
        self.time_spent += entry.hours;
        self.billed_amount += entry.amount;
        self.last_updated = Utc::now();
        self.time_entries.push(entry.clone());
        entry
    }

    /// Attach a note stamped with the current status.
    pub fn add_note(
        &mut self,
        content: impl Into<String>,
        author: impl Into<String>,
        note_type: impl Into<String>,
    ) -> CaseNote {
        let note = CaseNote {
            id: Uuid::new_v4(),
            case_id: self.case_id.clone(),
            timestamp: Utc::now(),
            author: author.into(),
            content: content.into(),
            note_type: note_type.into(),
            case_status_at_time: self.status,
        };
        self.notes.push(note.clone());
        note
    }

    /// Notes, newest first; among equal timestamps the later-added note comes first.
    pub fn notes_newest_first(&self) -> Vec<CaseNote> {
        let mut notes: Vec<CaseNote> = self.notes.iter().rev().cloned().collect();
        notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_ids_have_expected_shape() {
        let id = generate_case_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3, "{id}");
        assert_eq!(parts[0], "LAW");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn sparse_json_gets_defaults() {
        let mut c: CaseRecord = serde_json::from_str(r#"{"description":"lease"}"#).unwrap();
        assert!(c.case_id.is_empty());
        assert!(c.fill_defaults());
        assert!(c.case_id.starts_with("LAW-"));
        let id = c.case_id.clone();
        assert!(!c.fill_defaults());
        assert_eq!(c.case_id, id);
        assert_eq!(c.client_name, "Unknown Client");
        assert_eq!(c.status, CaseStatus::Intake);
        assert_eq!(c.complexity_score, 50);
        assert!(c.analysis.is_none());
    }

    #[test]
    fn transition_records_history() {
        let mut c = CaseRecord::new("Ada", "ada@example.com");
        c.transition(CaseStatus::Review, Some("docs received".into()));
        c.transition(CaseStatus::OnHold, None);
        assert_eq!(c.status, CaseStatus::OnHold);
        assert_eq!(c.status_history.len(), 2);
        assert_eq!(c.status_history[0].from, CaseStatus::Intake);
        assert_eq!(c.status_history[1].from, CaseStatus::Review);

        let notes = c.notes_newest_first();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "Status changed from Review to On Hold");
        assert_eq!(notes[0].case_status_at_time, CaseStatus::OnHold);
        assert_eq!(notes[1].content, "Status changed from Intake to Review: docs received");
        assert_eq!(notes[1].author, SYSTEM_AUTHOR);
        assert_eq!(notes[1].note_type, STATUS_CHANGE_NOTE);

        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["status"], serde_json::json!("On Hold"));
        assert_eq!(v["notes"][0]["type"], serde_json::json!(STATUS_CHANGE_NOTE));
    }

    #[test]
    fn blank_id_and_client_are_filled() {
        let mut c: CaseRecord =
            serde_json::from_str(r#"{"case_id":"  ","client_name":""}"#).unwrap();
        assert!(c.fill_defaults());
        assert!(c.case_id.starts_with("LAW-"));
        assert_eq!(c.client_name, "Unknown Client");
    }

    #[test]
    fn logged_time_rolls_up() {
        let mut c = CaseRecord::new("Ada", "ada@example.com");
        c.log_time(TimeEntry::new("", "intake call", 1.5, DEFAULT_HOURLY_RATE, None, "Ada"));
        let e = c.log_time(TimeEntry::new("", "drafting", 2.0, 300.0, None, SYSTEM_AUTHOR));
        assert_eq!(e.case_id, c.case_id);
        assert_eq!(e.amount, 600.0);
        assert!(!e.billed);
        assert_eq!(c.time_entries.len(), 2);
        assert!((c.time_spent - 3.5).abs() < 1e-9);
        assert!((c.billed_amount - 975.0).abs() < 1e-9);
    }
}
