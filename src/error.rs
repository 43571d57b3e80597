//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "Missing required fields: baseUrl, token",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details (e.g. the upstream response body).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request           |
/// | 3000–3999 | Server/Upstream | 5xx / upstream passthrough |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request body is missing one or more required fields.
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),

    /// The vendor API replied with a non-success status. The upstream
    /// status and body are passed through to the browser.
    #[error("{context}: upstream returned status {status}")]
    UpstreamStatus {
        /// Which proxy operation failed (e.g. `"Login failed"`).
        context: &'static str,
        /// HTTP status returned by the vendor API.
        status: u16,
        /// Upstream response body, if it could be read.
        details: Option<serde_json::Value>,
    },

    /// The vendor API could not be reached (connect failure or timeout).
    #[error("{context}: {source}")]
    UpstreamUnreachable {
        /// Which proxy operation failed.
        context: &'static str,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Wraps a transport-level [`reqwest::Error`] from a proxy forwarder.
    #[must_use]
    pub fn unreachable(context: &'static str, source: reqwest::Error) -> Self {
        Self::UpstreamUnreachable { context, source }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingFields(_) => 1001,
            Self::UpstreamStatus { .. } => 3001,
            Self::UpstreamUnreachable { .. } => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// Upstream failures reuse the vendor's status where one exists, so the
    /// browser sees the same status it would have seen without the proxy.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::UpstreamUnreachable { source, .. } => {
                if source.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::UpstreamStatus { details, .. } => details.clone(),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
