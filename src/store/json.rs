//! Flat-file backing: the whole case list as one pretty JSON array.
//!
//! A missing or blank file reads as an empty list. Parent directories are
//! created on first save. Reads and writes within this process are serialized;
//! records found without an id get one, and the file is rewritten so the id
//! sticks.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::{fill_case_defaults, CaseRecord, Edit, RecordStore, StoreError};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_unlocked(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Read and persist any filled-in defaults. Caller holds the lock.
    fn read_normalized(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let mut cases = self.read_unlocked()?;
        if fill_case_defaults(&mut cases) {
            debug!(target: "store", path = %self.path.display(), "assigned missing case ids");
            self.write_unlocked(&cases)?;
        }
        Ok(cases)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn write_unlocked(&self, cases: &[CaseRecord]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_string_pretty(cases)?;
        fs::write(&self.path, body).map_err(|e| self.io_err(e))?;
        debug!(target: "store", path = %self.path.display(), count = cases.len(), "cases saved");
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let _guard = self.lock()?;
        self.read_normalized()
    }

    fn save_all(&self, cases: &[CaseRecord]) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut cases = cases.to_vec();
        fill_case_defaults(&mut cases);
        self.write_unlocked(&cases)
    }

    fn modify(&self, edit: Edit<'_>) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let mut cases = self.read_normalized()?;
        let changed = edit(&mut cases);
        if changed {
            fill_case_defaults(&mut cases);
            self.write_unlocked(&cases)?;
        }
        Ok(changed)
    }
}
