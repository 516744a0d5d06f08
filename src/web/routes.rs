//! REST API routes

use super::AppState;
use crate::db::Database;
use crate::{Channel, EngineError, RiskAssessment, Severity, Submission, Verdict};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

// ============================================================================
// Status & Stats
// ============================================================================

#[derive(Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    pub uptime_seconds: u64,
    pub categories: usize,
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds()
        .max(0) as u64;

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        categories: state.engine.catalog().categories.len(),
    })
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_reports: i64,
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
    pub counters: super::RequestCounters,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, StatusCode> {
    let stats = Database::open(&state.db_path)
        .and_then(|db| db.get_stats())
        .map_err(internal_error)?;
    let counters = state.counters.read().await.clone();

    Ok(Json(StatsResponse {
        total_reports: stats.total_reports,
        critical: stats.critical,
        high: stats.high,
        medium: stats.medium,
        low: stats.low,
        counters,
    }))
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Serialize)]
pub struct CategoryResponse {
    pub name: String,
    pub severity: Severity,
    pub description: String,
    pub pattern_count: usize,
}

pub async fn get_categories(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryResponse>> {
    let categories = state
        .engine
        .catalog()
        .categories
        .iter()
        .map(|c| CategoryResponse {
            name: c.name.clone(),
            severity: c.severity,
            description: c.description.clone(),
            pattern_count: c.patterns.len(),
        })
        .collect();
    Json(categories)
}

// ============================================================================
// Assessment
// ============================================================================

#[derive(Deserialize)]
pub struct AssessRequest {
    pub text: String,
    #[serde(default)]
    pub caller_number: Option<String>,
    #[serde(default)]
    pub channel: Option<Channel>,
}

#[derive(Serialize)]
pub struct AssessResponse {
    /// Id of the stored report; absent when storage failed and the
    /// assessment below is the only record of this submission
    pub report_id: Option<String>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

pub async fn assess(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, (StatusCode, String)> {
    let assessment = match state.engine.assess(&req.text, req.caller_number.as_deref()) {
        Ok(assessment) => assessment,
        Err(e) => {
            state.counters.write().await.rejected_inputs += 1;
            return Err(engine_error(e));
        }
    };

    {
        let mut counters = state.counters.write().await;
        counters.total_assessments += 1;
        match assessment.overall_risk {
            Severity::Critical => counters.critical_count += 1,
            Severity::High => counters.high_count += 1,
            _ => {}
        }
    }

    // Store the scrubbed submission; a storage failure must not lose the
    // assessment the user is waiting on
    let scrubbed = state.scrubber.scrub(&req.text);
    let submission = Submission::new(
        req.channel.unwrap_or_default(),
        scrubbed.text,
        req.caller_number.clone(),
    );
    let report_id = match Database::open(&state.db_path)
        .and_then(|db| db.store_report(&submission, &assessment))
    {
        Ok(()) => Some(submission.id),
        Err(e) => {
            error!("Failed to store report {}: {}", submission.id, e);
            None
        }
    };

    Ok(Json(AssessResponse {
        report_id,
        assessment,
    }))
}

#[derive(Deserialize)]
pub struct QuickCheckRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct QuickCheckResponse {
    pub verdict: Verdict,
}

pub async fn quick_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuickCheckRequest>,
) -> Result<Json<QuickCheckResponse>, (StatusCode, String)> {
    let verdict = match state.engine.quick_check(&req.text) {
        Ok(verdict) => verdict,
        Err(e) => {
            state.counters.write().await.rejected_inputs += 1;
            return Err(engine_error(e));
        }
    };

    let mut counters = state.counters.write().await;
    counters.quick_checks += 1;

    Ok(Json(QuickCheckResponse { verdict }))
}

// ============================================================================
// Reports & Trends
// ============================================================================

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub timestamp: String,
    pub channel: String,
    pub content: String,
    pub overall_risk: Severity,
    pub confidence: u8,
    pub matched_categories: Vec<String>,
    pub immediate_action_required: bool,
}

pub async fn get_recent_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<ReportResponse>>, StatusCode> {
    let limit = query.limit.unwrap_or(20).min(200);
    let reports = Database::open(&state.db_path)
        .and_then(|db| db.get_recent_reports(limit))
        .map_err(internal_error)?;

    Ok(Json(
        reports
            .into_iter()
            .map(|r| ReportResponse {
                id: r.id,
                timestamp: r.timestamp.to_rfc3339(),
                channel: r.channel.to_string(),
                content: r.content,
                overall_risk: r.overall_risk,
                confidence: r.confidence,
                matched_categories: r.matched_categories,
                immediate_action_required: r.immediate_action_required,
            })
            .collect(),
    ))
}

#[derive(Deserialize)]
pub struct TrendsQuery {
    pub days: Option<u32>,
}

#[derive(Serialize)]
pub struct TrendEntry {
    pub category: String,
    pub report_count: i64,
}

pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<Vec<TrendEntry>>, StatusCode> {
    let days = query.days.unwrap_or(30);
    let trends = Database::open(&state.db_path)
        .and_then(|db| db.category_trends(days))
        .map_err(internal_error)?;

    Ok(Json(
        trends
            .into_iter()
            .map(|(category, report_count)| TrendEntry {
                category,
                report_count,
            })
            .collect(),
    ))
}

// ============================================================================
// Error mapping
// ============================================================================

fn engine_error(e: EngineError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn internal_error(e: anyhow::Error) -> StatusCode {
    error!("Request failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}
