use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::analyze::MatterAnalyzer;
use crate::matter::{AnalysisResult, MatterInput};
use crate::stats::CaseStatistics;
use crate::store::{
    self, CaseNote, CaseRecord, CaseStatus, RecordStore, SearchField, StoreError, TimeEntry,
    DEFAULT_HOURLY_RATE, GENERAL_NOTE, SYSTEM_AUTHOR,
};
use crate::trades::{calculate_metrics, TradeMetrics, TradeRecord};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<MatterAnalyzer>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(analyzer: MatterAnalyzer, store: Arc<dyn RecordStore>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            store,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/cases", get(list_cases).post(create_case))
        .route("/cases/{id}", get(get_case).delete(delete_case))
        .route("/cases/{id}/status", post(change_status))
        .route("/cases/{id}/time", get(list_case_time).post(log_time))
        .route("/cases/{id}/notes", get(list_notes).post(add_note))
        .route("/time", get(time_report))
        .route("/stats", get(case_stats))
        .route("/trades/metrics", post(trade_metrics))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

type ApiError = (StatusCode, String);

fn store_failure(e: StoreError) -> ApiError {
    error!(target: "store", error = %e, "record store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "case store unavailable".to_string(),
    )
}

fn not_found(case_id: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("case {case_id} not found"))
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL.is_match(email)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    description: String,
    #[serde(default)]
    matter_type: String,
    #[serde(default)]
    urgency: String,
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Json<AnalysisResult> {
    let input = MatterInput::from_form(&body.description, &body.matter_type, &body.urgency);
    Json(state.analyzer.analyze(&input))
}

#[derive(Deserialize)]
struct IntakeReq {
    client_name: String,
    email: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    case_type: String,
    #[serde(default)]
    practice_area: String,
    #[serde(default)]
    matter_value: f64,
    #[serde(default)]
    jurisdiction: String,
    #[serde(default)]
    urgency: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    complexity_score: Option<u32>,
}

async fn create_case(
    State(state): State<AppState>,
    Json(body): Json<IntakeReq>,
) -> Result<(StatusCode, Json<CaseRecord>), ApiError> {
    if body.client_name.trim().is_empty() {
        return Err(unprocessable("client_name is required"));
    }
    if !validate_email(body.email.trim()) {
        return Err(unprocessable("email is not valid"));
    }

    let analysis = state.analyzer.analyze(&MatterInput::from_form(
        &body.description,
        &body.case_type,
        &body.urgency,
    ));

    let mut case = CaseRecord::new(body.client_name.trim(), body.email.trim());
    case.company_name = body.company_name;
    case.case_type = body.case_type;
    case.practice_area = if body.practice_area.trim().is_empty() {
        analysis.practice_area.clone()
    } else {
        body.practice_area
    };
    case.matter_value = body.matter_value.max(0.0);
    case.jurisdiction = body.jurisdiction;
    case.urgency = body.urgency;
    case.description = body.description;
    if let Some(score) = body.complexity_score {
        case.complexity_score = score.min(100);
    }
    case.analysis = Some(analysis);

    state.store.append(case.clone()).map_err(store_failure)?;
    counter!("matter_cases_created_total").increment(1);
    info!(target: "store", case_id = %case.case_id, "case created");

    Ok((StatusCode::CREATED, Json(case)))
}

#[derive(Deserialize)]
struct CasesQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    field: SearchField,
}

async fn list_cases(
    State(state): State<AppState>,
    Query(query): Query<CasesQuery>,
) -> Result<Json<Vec<CaseRecord>>, ApiError> {
    let cases = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => store::search_cases(state.store.as_ref(), q, query.field),
        None => state.store.load_all(),
    }
    .map_err(store_failure)?;
    Ok(Json(cases))
}

async fn get_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseRecord>, ApiError> {
    state
        .store
        .get_by_id(&case_id)
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| not_found(&case_id))
}

#[derive(Deserialize)]
struct StatusReq {
    status: CaseStatus,
    #[serde(default)]
    notes: Option<String>,
}

async fn change_status(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Json(body): Json<StatusReq>,
) -> Result<Json<CaseRecord>, ApiError> {
    store::update_status(state.store.as_ref(), &case_id, body.status, body.notes)
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| not_found(&case_id))
}

async fn delete_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if store::delete_case(state.store.as_ref(), &case_id).map_err(store_failure)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&case_id))
    }
}

fn unprocessable(msg: &str) -> ApiError {
    (StatusCode::UNPROCESSABLE_ENTITY, msg.to_string())
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Deserialize)]
struct TimeReq {
    #[serde(default)]
    task_description: String,
    hours: f64,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    user: Option<String>,
}

async fn log_time(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Json(body): Json<TimeReq>,
) -> Result<(StatusCode, Json<TimeEntry>), ApiError> {
    if !body.hours.is_finite() || body.hours <= 0.0 {
        return Err(unprocessable("hours must be a positive number"));
    }
    let rate = body.rate.unwrap_or(DEFAULT_HOURLY_RATE);
    if !rate.is_finite() || rate < 0.0 {
        return Err(unprocessable("rate must be zero or more"));
    }
    let user = or_default(body.user, SYSTEM_AUTHOR);

    store::add_time_entry(
        state.store.as_ref(),
        &case_id,
        body.task_description.trim(),
        body.hours,
        rate,
        body.date,
        &user,
    )
    .map_err(store_failure)?
    .map(|e| (StatusCode::CREATED, Json(e)))
    .ok_or_else(|| not_found(&case_id))
}

async fn list_case_time(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<Vec<TimeEntry>>, ApiError> {
    store::time_entries_for_case(state.store.as_ref(), &case_id)
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| not_found(&case_id))
}

#[derive(Deserialize)]
struct TimeQuery {
    #[serde(default)]
    from: Option<NaiveDate>,
    #[serde(default)]
    to: Option<NaiveDate>,
}

async fn time_report(
    State(state): State<AppState>,
    Query(query): Query<TimeQuery>,
) -> Result<Json<Vec<TimeEntry>>, ApiError> {
    let entries = store::time_entries_between(state.store.as_ref(), query.from, query.to)
        .map_err(store_failure)?;
    Ok(Json(entries))
}

#[derive(Deserialize)]
struct NoteReq {
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default, rename = "type")]
    note_type: Option<String>,
}

async fn add_note(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Json(body): Json<NoteReq>,
) -> Result<(StatusCode, Json<CaseNote>), ApiError> {
    let content = body.content.trim();
    if content.is_empty() {
        return Err(unprocessable("content is required"));
    }
    let author = or_default(body.author, SYSTEM_AUTHOR);
    let note_type = or_default(body.note_type, GENERAL_NOTE);

    store::add_case_note(state.store.as_ref(), &case_id, content, &author, &note_type)
        .map_err(store_failure)?
        .map(|n| (StatusCode::CREATED, Json(n)))
        .ok_or_else(|| not_found(&case_id))
}

async fn list_notes(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<Vec<CaseNote>>, ApiError> {
    store::case_notes(state.store.as_ref(), &case_id)
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| not_found(&case_id))
}

async fn case_stats(State(state): State<AppState>) -> Result<Json<CaseStatistics>, ApiError> {
    let cases = state.store.load_all().map_err(store_failure)?;
    Ok(Json(CaseStatistics::from_cases(&cases)))
}

async fn trade_metrics(Json(trades): Json<Vec<TradeRecord>>) -> Json<Option<TradeMetrics>> {
    Json(calculate_metrics(&trades))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("ada@example.com"));
        assert!(validate_email("first.last+tag@sub.example.co"));
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign"));
        assert!(!validate_email("a@b.c"));
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(!validate_email(&long));
    }
}
