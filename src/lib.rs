// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod logging;
pub mod matter;
pub mod metrics;
pub mod stats;
pub mod store;
pub mod trades;

// Rule-based matter classifier (tables, scoring, issue/risk banks)
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze_matter, LookupTables, MatterAnalyzer};
pub use crate::api::{create_router, AppState};
pub use crate::matter::{AnalysisResult, Complexity, MatterInput, Priority, Urgency};

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::store::JsonFileStore;

/// Build the full router from configuration: tables, JSON case store, API routes.
/// The `/metrics` route is added by the binary, which owns the global recorder.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<axum::Router> {
    let tables = cfg.load_tables()?;
    let analyzer = MatterAnalyzer::new(tables);
    let store = Arc::new(JsonFileStore::new(cfg.data_path.clone()));
    info!(data_path = %cfg.data_path.display(), "case store ready");
    Ok(create_router(AppState::new(analyzer, store)))
}
