//! Matter triage service: Binary Entrypoint
//! Boots the Axum HTTP server, wiring configuration, the case store, and metrics.

use matter_triage::config::AppConfig;
use matter_triage::logging::enable_dev_tracing;
use matter_triage::metrics::Metrics;
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables MATTER_TABLES_PATH / MATTER_DATA_PATH from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let cfg = AppConfig::from_env();
    let app = matter_triage::build_app(&cfg)?;
    let metrics = Metrics::init()?;

    Ok(app.merge(metrics.router()).into())
}
