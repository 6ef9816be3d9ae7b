//! Case record store.
//!
//! The analyzer never touches storage; the intake service does, through the
//! `RecordStore` trait. Two backings: `MemoryStore` (tests, ephemeral runs) and
//! `JsonFileStore` (one pretty-printed JSON array on disk). Time entries and
//! notes live inside their case, so deleting a case removes them too. Neither
//! backing promises durability or multi-writer safety across processes.

pub mod activity;
pub mod error;
pub mod json;
pub mod memory;
pub mod record;

use serde::Deserialize;
use tracing::info;

pub use activity::{
    add_case_note, add_time_entry, case_notes, time_entries_between, time_entries_for_case,
};
pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{
    fill_case_defaults, generate_case_id, CaseNote, CaseRecord, CaseStatus, StatusChange,
    TimeEntry, DEFAULT_HOURLY_RATE, GENERAL_NOTE, STATUS_CHANGE_NOTE, SYSTEM_AUTHOR,
};

/// Closure handed to `RecordStore::modify`; returns whether the list changed.
pub type Edit<'a> = &'a mut dyn FnMut(&mut Vec<CaseRecord>) -> bool;

pub trait RecordStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<CaseRecord>, StoreError>;

    fn save_all(&self, cases: &[CaseRecord]) -> Result<(), StoreError>;

    /// Read-modify-write of the whole list. Saved only when `edit` returns true.
    /// Implementations hold their write lock for the whole call.
    fn modify(&self, edit: Edit<'_>) -> Result<bool, StoreError> {
        let mut cases = self.load_all()?;
        let changed = edit(&mut cases);
        if changed {
            self.save_all(&cases)?;
        }
        Ok(changed)
    }

    fn append(&self, case: CaseRecord) -> Result<(), StoreError> {
        let mut case = Some(case);
        self.modify(&mut |cases: &mut Vec<CaseRecord>| match case.take() {
            Some(c) => {
                cases.push(c);
                true
            }
            None => false,
        })?;
        Ok(())
    }

    fn get_by_id(&self, case_id: &str) -> Result<Option<CaseRecord>, StoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|c| c.case_id == case_id))
    }
}

/// Apply `change` to one case under the store lock. `None` when the id is unknown.
pub fn with_case<T>(
    store: &dyn RecordStore,
    case_id: &str,
    mut change: impl FnMut(&mut CaseRecord) -> T,
) -> Result<Option<T>, StoreError> {
    let mut out = None;
    store.modify(&mut |cases: &mut Vec<CaseRecord>| {
        match cases.iter_mut().find(|c| c.case_id == case_id) {
            Some(case) => {
                out = Some(change(case));
                true
            }
            None => false,
        }
    })?;
    Ok(out)
}

/// Change a case's status. Returns the updated case, or `None` if the id is unknown.
pub fn update_status(
    store: &dyn RecordStore,
    case_id: &str,
    status: CaseStatus,
    mut notes: Option<String>,
) -> Result<Option<CaseRecord>, StoreError> {
    let updated = with_case(store, case_id, |case: &mut CaseRecord| {
        let from = case.status;
        case.transition(status, notes.take());
        (from, case.clone())
    })?;

    Ok(updated.map(|(from, case)| {
        info!(target: "store", %case_id, %from, to = %status, "case status changed");
        case
    }))
}

/// Remove a case together with its time entries and notes. Returns whether anything was removed.
pub fn delete_case(store: &dyn RecordStore, case_id: &str) -> Result<bool, StoreError> {
    let removed = store.modify(&mut |cases: &mut Vec<CaseRecord>| {
        let before = cases.len();
        cases.retain(|c| c.case_id != case_id);
        cases.len() != before
    })?;
    if removed {
        info!(target: "store", %case_id, "case deleted");
    }
    Ok(removed)
}

/// Which text field a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    All,
    ClientName,
    CaseType,
    Description,
    PracticeArea,
    CompanyName,
}

impl SearchField {
    const ORDER: [SearchField; 5] = [
        SearchField::ClientName,
        SearchField::CaseType,
        SearchField::Description,
        SearchField::PracticeArea,
        SearchField::CompanyName,
    ];

    fn value<'c>(&self, case: &'c CaseRecord) -> &'c str {
        match self {
            Self::ClientName => &case.client_name,
            Self::CaseType => &case.case_type,
            Self::Description => &case.description,
            Self::PracticeArea => &case.practice_area,
            Self::CompanyName => &case.company_name,
            Self::All => "",
        }
    }

    fn matches(&self, case: &CaseRecord, needle_lower: &str) -> bool {
        match self {
            Self::All => Self::ORDER.iter().any(|f| f.matches(case, needle_lower)),
            f => f.value(case).to_lowercase().contains(needle_lower),
        }
    }
}

/// Case-insensitive substring search; each case appears at most once.
pub fn search_cases(
    store: &dyn RecordStore,
    keyword: &str,
    field: SearchField,
) -> Result<Vec<CaseRecord>, StoreError> {
    let needle = keyword.to_lowercase();
    Ok(store
        .load_all()?
        .into_iter()
        .filter(|c| field.matches(c, &needle))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryStore {
        let mut a = CaseRecord::new("Alice Moreau", "alice@example.com");
        a.case_type = "Contract Dispute".into();
        a.description = "Supplier missed deliveries".into();
        let mut b = CaseRecord::new("Bob Lin", "bob@example.com");
        b.company_name = "Lin Logistics LLC".into();
        b.practice_area = "Corporate".into();
        MemoryStore::with_cases(vec![a, b])
    }

    #[test]
    fn search_all_fields_and_single_field() {
        let store = seeded();
        let hits = search_cases(&store, "CONTRACT", SearchField::All).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].client_name, "Alice Moreau");

        let hits = search_cases(&store, "logistics", SearchField::CompanyName).unwrap();
        assert_eq!(hits.len(), 1);
        let hits = search_cases(&store, "logistics", SearchField::ClientName).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn update_and_delete() {
        let store = seeded();
        let id = store.load_all().unwrap()[0].case_id.clone();

        let updated = update_status(&store, &id, CaseStatus::Active, Some("retainer signed".into()))
            .unwrap()
            .expect("case exists");
        assert_eq!(updated.status, CaseStatus::Active);
        assert_eq!(store.get_by_id(&id).unwrap().unwrap().status, CaseStatus::Active);

        assert!(update_status(&store, "LAW-0-NOPE00", CaseStatus::Closed, None)
            .unwrap()
            .is_none());

        assert!(delete_case(&store, &id).unwrap());
        assert!(!delete_case(&store, &id).unwrap());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
