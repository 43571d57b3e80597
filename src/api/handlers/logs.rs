//! Log store endpoints serving the simulator's log viewer page.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{ClearLogsResponse, LogsQuery, LogsResponse};
use crate::app_state::AppState;

/// Default number of records returned when the query sets no limit.
const DEFAULT_LOG_LIMIT: usize = 100;

/// `GET /api/logs` — Recent log records, filtered and limited.
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Logs",
    summary = "Query recent log records",
    description = "Returns the newest captured log records, optionally filtered by level and timestamp lower bound.",
    responses(
        (status = 200, description = "Matching log records", body = LogsResponse),
    )
)]
pub async fn get_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsQuery>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let logs = state
        .log_store
        .query(params.level.as_deref(), params.from_date, limit);

    Json(LogsResponse {
        count: logs.len(),
        logs,
        timestamp: Utc::now(),
    })
}

/// `POST /api/logs/clear` — Drop all captured log records.
#[utoipa::path(
    post,
    path = "/api/logs/clear",
    tag = "Logs",
    summary = "Clear the log store",
    responses(
        (status = 200, description = "Store cleared", body = ClearLogsResponse),
    )
)]
pub async fn clear_logs(State(state): State<AppState>) -> impl IntoResponse {
    state.log_store.clear();
    tracing::info!("log store cleared");

    Json(ClearLogsResponse {
        success: true,
        message: "Logs cleared successfully".to_string(),
        timestamp: Utc::now(),
    })
}

/// Log routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(get_logs))
        .route("/logs/clear", post(clear_logs))
}
