use std::sync::RwLock;

use super::{fill_case_defaults, CaseRecord, Edit, RecordStore, StoreError};

/// In-memory store; contents are lost with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<CaseRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cases(mut cases: Vec<CaseRecord>) -> Self {
        fill_case_defaults(&mut cases);
        Self {
            inner: RwLock::new(cases),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save_all(&self, cases: &[CaseRecord]) -> Result<(), StoreError> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        *guard = cases.to_vec();
        fill_case_defaults(&mut guard);
        Ok(())
    }

    fn modify(&self, edit: Edit<'_>) -> Result<bool, StoreError> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let changed = edit(&mut *guard);
        if changed {
            fill_case_defaults(&mut guard);
        }
        Ok(changed)
    }
}
