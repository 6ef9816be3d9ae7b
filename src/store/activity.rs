//! Time tracking and case notes.
//!
//! Both are stored inside their `CaseRecord`; every write goes through
//! `with_case`, so it holds the store lock.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use super::{with_case, CaseNote, CaseRecord, RecordStore, StoreError, TimeEntry};

/// Log work against a case. `None` when the id is unknown.
pub fn add_time_entry(
    store: &dyn RecordStore,
    case_id: &str,
    task_description: &str,
    hours: f64,
    rate: f64,
    date: Option<DateTime<Utc>>,
    user: &str,
) -> Result<Option<TimeEntry>, StoreError> {
    let entry = with_case(store, case_id, |case: &mut CaseRecord| {
        case.log_time(TimeEntry::new(
            case_id,
            task_description,
            hours,
            rate,
            date,
            user,
        ))
    })?;
    if let Some(e) = &entry {
        info!(target: "store", %case_id, hours = e.hours, amount = e.amount, "time logged");
    }
    Ok(entry)
}

/// Entries of one case in logging order. `None` when the id is unknown.
pub fn time_entries_for_case(
    store: &dyn RecordStore,
    case_id: &str,
) -> Result<Option<Vec<TimeEntry>>, StoreError> {
    Ok(store.get_by_id(case_id)?.map(|c| c.time_entries))
}

/// Entries across all cases whose work date falls within `from..=to` (either bound
/// optional), ordered by date.
pub fn time_entries_between(
    store: &dyn RecordStore,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<TimeEntry>, StoreError> {
    let mut entries: Vec<TimeEntry> = store
        .load_all()?
        .into_iter()
        .flat_map(|c| c.time_entries)
        .filter(|e| {
            let day = e.date.date_naive();
            from.map_or(true, |f| day >= f) && to.map_or(true, |t| day <= t)
        })
        .collect();
    entries.sort_by_key(|e| e.date);
    Ok(entries)
}

/// Attach a note. `None` when the id is unknown.
pub fn add_case_note(
    store: &dyn RecordStore,
    case_id: &str,
    content: &str,
    author: &str,
    note_type: &str,
) -> Result<Option<CaseNote>, StoreError> {
    with_case(store, case_id, |case: &mut CaseRecord| {
        case.add_note(content, author, note_type)
    })
}

/// Notes of one case, newest first. `None` when the id is unknown.
pub fn case_notes(
    store: &dyn RecordStore,
    case_id: &str,
) -> Result<Option<Vec<CaseNote>>, StoreError> {
    Ok(store
        .get_by_id(case_id)?
        .map(|c| c.notes_newest_first()))
}
