//! Axum WebSocket upgrade handler for the MQTT relay.

use std::net::SocketAddr;

use axum::extract::connect_info::ConnectInfo;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::IntoResponse;

use super::session::run_session;
use crate::app_state::AppState;

/// `GET /mqtt-proxy` — Upgrade HTTP connection to WebSocket and start a
/// relay session for the connecting client.
pub async fn relay_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_session(socket, peer.to_string(), state))
}
