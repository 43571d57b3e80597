//! DTOs for the log store endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::logstore::LogEntry;

/// Query parameters for `GET /api/logs`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsQuery {
    /// Only return records at this level (case-insensitive).
    pub level: Option<String>,
    /// Maximum number of records to return (newest win). Defaults to 100.
    pub limit: Option<usize>,
    /// Only return records at or after this RFC 3339 timestamp.
    #[serde(rename = "fromDate")]
    pub from_date: Option<DateTime<Utc>>,
}

/// Response body for `GET /api/logs`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogsResponse {
    /// Matching records, oldest first.
    pub logs: Vec<LogEntry>,
    /// Number of records returned.
    pub count: usize,
    /// Time the query was served.
    pub timestamp: DateTime<Utc>,
}

/// Response body for `POST /api/logs/clear`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClearLogsResponse {
    /// Always `true` — clearing an in-memory buffer cannot fail.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Time the store was cleared.
    pub timestamp: DateTime<Utc>,
}
