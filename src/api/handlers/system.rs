//! System endpoints: health check and runtime info.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    uptime_secs: u64,
}

/// `GET /health` (and `GET /api/health`) — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, uptime, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.started_at.elapsed().as_secs(),
        }),
    )
}

/// Runtime info response.
#[derive(Debug, Serialize, ToSchema)]
struct SystemInfoResponse {
    version: String,
    platform: &'static str,
    uptime_secs: u64,
    active_relay_sessions: usize,
    captured_log_records: usize,
    timestamp: String,
}

/// `GET /api/system/info` — Process and runtime information.
#[utoipa::path(
    get,
    path = "/api/system/info",
    tag = "System",
    summary = "Runtime information",
    description = "Returns version, platform, uptime, the number of live MQTT relay sessions, and log store size.",
    responses(
        (status = 200, description = "Runtime information", body = SystemInfoResponse),
    )
)]
pub async fn system_info_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(SystemInfoResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS,
            uptime_secs: state.started_at.elapsed().as_secs(),
            active_relay_sessions: state.sessions.len().await,
            captured_log_records: state.log_store.len(),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}

/// System routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/system/info", get(system_info_handler))
}

/// Root-level routes (container health probes hit `/health` directly).
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
