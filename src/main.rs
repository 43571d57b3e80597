//! iotsim-gateway server entry point.
//!
//! Starts the Axum HTTP server with the vendor proxy REST endpoints and the
//! MQTT WebSocket relay.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use iotsim_gateway::api;
use iotsim_gateway::app_state::AppState;
use iotsim_gateway::config::GatewayConfig;
use iotsim_gateway::relay::handler::relay_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Build application state (the log store must exist before tracing
    // init so the capture layer can be attached)
    let app_state = AppState::new(config.clone());

    // Initialize tracing: console output plus in-memory capture
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(app_state.log_store.layer())
        .init();

    tracing::info!(addr = %config.listen_addr, "starting iotsim-gateway");

    // CORS: lock to the frontend origin when one is configured
    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .context("CORS_ORIGIN is not a valid header value")?,
            )
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/mqtt-proxy", get(relay_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");
    tracing::info!("MQTT relay available on /mqtt-proxy");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves on ctrl-c or SIGTERM so in-flight requests can finish before
/// the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received, closing server");
}
