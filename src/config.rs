//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), each with a default that works for
//! local development alongside the simulator frontend.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3001`).
    pub listen_addr: SocketAddr,

    /// Allowed CORS origin for the browser frontend. `None` means permissive.
    pub cors_origin: Option<String>,

    /// Seconds to wait for the outbound TCP connect to an MQTT broker
    /// before failing the relay handshake.
    pub broker_connect_timeout_secs: u64,

    /// Timeout in seconds for most vendor API proxy requests.
    pub proxy_timeout_secs: u64,

    /// Timeout in seconds for the device-listing proxy request, which the
    /// vendor serves noticeably slower than the rest of its API.
    pub proxy_fetch_timeout_secs: u64,

    /// Maximum number of log records retained by the in-memory log store.
    pub log_store_capacity: usize,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address like 0.0.0.0:3001")?;

        let cors_origin = std::env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty());

        let broker_connect_timeout_secs = parse_env("BROKER_CONNECT_TIMEOUT_SECS", 10);
        let proxy_timeout_secs = parse_env("PROXY_TIMEOUT_SECS", 10);
        let proxy_fetch_timeout_secs = parse_env("PROXY_FETCH_TIMEOUT_SECS", 30);
        let log_store_capacity = parse_env("LOG_STORE_CAPACITY", 10_000);

        Ok(Self {
            listen_addr,
            cors_origin,
            broker_connect_timeout_secs,
            proxy_timeout_secs,
            proxy_fetch_timeout_secs,
            log_store_capacity,
        })
    }

    /// Outbound broker connect timeout as a [`Duration`].
    #[must_use]
    pub const fn broker_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.broker_connect_timeout_secs)
    }

    /// Default vendor proxy request timeout as a [`Duration`].
    #[must_use]
    pub const fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }

    /// Device-listing proxy request timeout as a [`Duration`].
    #[must_use]
    pub const fn proxy_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_fetch_timeout_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
