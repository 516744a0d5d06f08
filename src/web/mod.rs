//! Web server for the ScamShield API
//!
//! REST endpoints used by the consumer apps: submit text for assessment,
//! run the quick pre-filter, and read trend stats over stored reports.

pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::engine::RiskEngine;
use crate::scrub::PiiScrubber;

/// Shared state for the web server
pub struct AppState {
    /// The immutable risk engine, safe to share across handlers
    pub engine: RiskEngine,
    /// PII scrubber applied before anything is stored
    pub scrubber: PiiScrubber,
    /// Database path
    pub db_path: PathBuf,
    /// Server start time
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Request counters
    pub counters: RwLock<RequestCounters>,
}

/// Runtime request counters
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RequestCounters {
    pub total_assessments: u64,
    pub critical_count: u64,
    pub high_count: u64,
    pub quick_checks: u64,
    pub rejected_inputs: u64,
}

/// Start the web server
pub async fn start_server(port: u16, engine: RiskEngine, db_path: PathBuf) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        engine,
        scrubber: PiiScrubber::new(),
        db_path,
        started_at: chrono::Utc::now(),
        counters: RwLock::new(RequestCounters::default()),
    });

    let app = Router::new()
        .route("/api/status", get(routes::get_status))
        .route("/api/stats", get(routes::get_stats))
        .route("/api/categories", get(routes::get_categories))
        .route("/api/reports/recent", get(routes::get_recent_reports))
        .route("/api/trends", get(routes::get_trends))
        .route("/api/assess", post(routes::assess))
        .route("/api/quick-check", post(routes::quick_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
