// src/config/mod.rs
//! Service configuration from the environment (`.env` is loaded by the binary).
//!
//! - `MATTER_TABLES_PATH`: TOML lookup tables; built-in tables when unset.
//! - `MATTER_DATA_PATH`:   JSON case file (default `data/cases.json`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::analyze::LookupTables;

pub const ENV_TABLES_PATH: &str = "MATTER_TABLES_PATH";
pub const ENV_DATA_PATH: &str = "MATTER_DATA_PATH";

pub const DEFAULT_DATA_PATH: &str = "data/cases.json";
pub const SHIPPED_TABLES_PATH: &str = "config/matter_tables.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tables_path: Option<PathBuf>,
    pub data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tables_path: None,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            tables_path: non_blank_env(ENV_TABLES_PATH).map(PathBuf::from),
            data_path: non_blank_env(ENV_DATA_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
        }
    }

    /// Load the configured tables; a configured path that fails to load is an error.
    pub fn load_tables(&self) -> anyhow::Result<Arc<LookupTables>> {
        let tables = match &self.tables_path {
            Some(path) => {
                let t = LookupTables::from_toml_file(path)
                    .with_context(|| format!("{ENV_TABLES_PATH}={}", path.display()))?;
                info!(
                    path = %path.display(),
                    categories = t.categories().len(),
                    "lookup tables loaded"
                );
                t
            }
            None => LookupTables::builtin(),
        };
        Ok(Arc::new(tables))
    }
}
