//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api`; the `/health` probe is
//! additionally exposed at the root for container health checks.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::root_routes())
}
