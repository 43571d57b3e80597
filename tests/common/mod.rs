#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Shared helpers for integration tests: boot the real gateway on an
//! ephemeral port, plus throwaway TCP brokers for the relay tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use futures_util::StreamExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use iotsim_gateway::api;
use iotsim_gateway::app_state::AppState;
use iotsim_gateway::config::GatewayConfig;
use iotsim_gateway::relay::handler::relay_handler;

/// Client-side WebSocket stream used by the tests.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Configuration with short timeouts suitable for tests.
pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origin: None,
        broker_connect_timeout_secs: 2,
        proxy_timeout_secs: 2,
        proxy_fetch_timeout_secs: 2,
        log_store_capacity: 1_000,
    }
}

/// Boots the full gateway (REST routes plus the `/mqtt-proxy` relay) on an
/// ephemeral port, mirroring the assembly in `main.rs`.
pub async fn spawn_gateway() -> (SocketAddr, AppState) {
    let state = AppState::new(test_config());
    let app = Router::new()
        .merge(api::build_router())
        .route("/mqtt-proxy", get(relay_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    (addr, state)
}

/// Broker double: accepts any number of connections and echoes every byte
/// back to its sender.
pub async fn spawn_echo_broker() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                loop {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            let Some(chunk) = buf.get(..n) else { break };
                            if stream.write_all(chunk).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            });
        }
    });
    addr
}

/// Opens a WebSocket connection to the gateway's relay endpoint.
pub async fn connect_relay(addr: SocketAddr) -> WsStream {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/mqtt-proxy"))
        .await
        .expect("relay upgrade failed");
    ws
}

/// Waits up to two seconds for the next message.
pub async fn next_message(ws: &mut WsStream) -> Message {
    timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for a message")
        .expect("connection closed while waiting for a message")
        .expect("websocket error while waiting for a message")
}

/// Asserts that nothing arrives on the socket for 300 ms.
pub async fn expect_silence(ws: &mut WsStream) {
    let res = timeout(Duration::from_millis(300), ws.next()).await;
    assert!(res.is_err(), "expected silence, got {res:?}");
}

/// The relay handshake frame for the given broker endpoint.
pub fn connect_frame(host: &str, port: u16) -> Message {
    Message::text(format!(
        r#"{{"type":"connect","broker":{{"host":"{host}","port":{port}}}}}"#
    ))
}
