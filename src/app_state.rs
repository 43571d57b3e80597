//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::GatewayConfig;
use crate::logstore::LogStore;
use crate::relay::registry::SessionRegistry;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared HTTP client used by the vendor API proxy handlers.
    pub http: reqwest::Client,
    /// Gateway configuration snapshot.
    pub config: Arc<GatewayConfig>,
    /// Captured log records served by the `/api/logs` endpoints.
    pub log_store: LogStore,
    /// Registry of live MQTT relay sessions.
    pub sessions: Arc<SessionRegistry>,
    /// Process start time, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Builds the application state from a loaded configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            log_store: LogStore::new(config.log_store_capacity),
            sessions: Arc::new(SessionRegistry::new()),
            started_at: Instant::now(),
            config: Arc::new(config),
        }
    }
}
