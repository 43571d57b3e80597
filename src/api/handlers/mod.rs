//! REST endpoint handlers organized by resource.

pub mod logs;
pub mod proxy;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(proxy::routes())
        .merge(logs::routes())
        .merge(system::routes())
}
