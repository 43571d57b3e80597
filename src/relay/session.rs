//! Relay session state machine.
//!
//! One task per accepted WebSocket. The session consumes exactly one
//! handshake message, optionally opens the broker TCP connection, then runs
//! a bidirectional forwarding loop until either side closes or errors.
//! Whichever terminal event fires first tears down both sides; a session is
//! never left half-open.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use uuid::Uuid;

use super::messages::{ControlFrame, Handshake, parse_handshake};
use crate::app_state::AppState;

/// States a relay session moves through.
///
/// ```text
/// AwaitingHandshake ──> Relaying ──> Closed
///          └─────────> Inert ─────> Closed
/// ```
///
/// `Inert` is entered when the first message is not a usable connect frame
/// (raw mode or invalid config): the WebSocket stays open, but with no
/// broker socket all traffic is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the first message to name a broker.
    AwaitingHandshake,
    /// Broker socket open; forwarding bytes in both directions.
    Relaying,
    /// Handshake consumed but no broker socket exists; traffic is dropped.
    Inert,
    /// Terminal. Both sides released.
    Closed,
}

/// Read buffer size for broker → client chunks.
const BROKER_READ_BUF: usize = 8 * 1024;

/// Runs one relay session to completion.
///
/// Registers the session on entry and removes it on exit, so the registry
/// always reflects the set of live sessions.
pub async fn run_session(socket: WebSocket, peer: String, state: AppState) {
    let id = Uuid::new_v4();
    state.sessions.insert(id, peer.clone()).await;
    tracing::info!(session = %id, %peer, "new WebSocket connection");

    drive(socket, id, &state).await;

    state.sessions.set_state(id, SessionState::Closed).await;
    state.sessions.remove(id).await;
    tracing::info!(session = %id, %peer, "WebSocket connection closed");
}

/// Handshake phase: consume exactly the first data-bearing message and
/// decide what the session becomes.
async fn drive(mut socket: WebSocket, id: Uuid, state: &AppState) {
    let first = loop {
        match socket.recv().await {
            Some(Ok(msg @ (Message::Text(_) | Message::Binary(_)))) => break msg.into_data(),
            Some(Ok(Message::Close(_))) | None => return,
            // Ping/pong are transport keepalives, not the handshake.
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                tracing::warn!(session = %id, error = %err, "WebSocket error before handshake");
                return;
            }
        }
    };

    match parse_handshake(&first) {
        Handshake::Connect { host, port } => {
            connect_and_relay(socket, id, state, &host, port).await;
        }
        Handshake::Invalid(reason) => {
            let _ = send_control(&mut socket, &ControlFrame::error(reason)).await;
            state.sessions.set_state(id, SessionState::Inert).await;
            drain(socket, id).await;
        }
        Handshake::Raw => {
            tracing::warn!(
                session = %id,
                "received non-JSON first message, treating as raw MQTT; no relay target"
            );
            state.sessions.set_state(id, SessionState::Inert).await;
            drain(socket, id).await;
        }
    }
}

/// Opens the broker TCP connection with a bounded timeout, acknowledges the
/// handshake, and enters the relay loop.
async fn connect_and_relay(
    mut socket: WebSocket,
    id: Uuid,
    state: &AppState,
    host: &str,
    port: u16,
) {
    let target = format!("{host}:{port}");
    tracing::info!(session = %id, %target, "connecting to MQTT broker");

    let connect_timeout = state.config.broker_connect_timeout();
    let broker = match tokio::time::timeout(connect_timeout, TcpStream::connect((host, port))).await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(err)) => {
            tracing::error!(session = %id, %target, error = %err, "MQTT broker connection error");
            let _ = send_control(&mut socket, &ControlFrame::error(err.to_string())).await;
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
        Err(_) => {
            tracing::error!(
                session = %id,
                %target,
                timeout_secs = state.config.broker_connect_timeout_secs,
                "MQTT broker connect timed out"
            );
            let message = format!("Connection to {target} timed out");
            let _ = send_control(&mut socket, &ControlFrame::error(message)).await;
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    tracing::info!(session = %id, %target, "connected to MQTT broker");
    if send_control(&mut socket, &ControlFrame::connected()).await.is_err() {
        // Client vanished between connect and ack; dropping the stream
        // releases the broker side.
        return;
    }

    state.sessions.set_relaying(id, target).await;
    relay(socket, broker, id).await;
}

/// Bidirectional forwarding loop.
///
/// Client → broker: every Text/Binary payload is written as-is to the TCP
/// socket. Broker → client: every chunk read from the TCP socket is sent as
/// one Binary message. Per-direction arrival order is preserved; chunk
/// boundaries carry no MQTT packet alignment.
async fn relay(socket: WebSocket, broker: TcpStream, id: Uuid) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (mut broker_rx, mut broker_tx) = broker.into_split();
    let mut buf = vec![0u8; BROKER_READ_BUF];

    loop {
        tokio::select! {
            msg = ws_rx.next() => match msg {
                Some(Ok(msg @ (Message::Binary(_) | Message::Text(_)))) => {
                    let data = msg.into_data();
                    if let Err(err) = broker_tx.write_all(&data).await {
                        tracing::error!(session = %id, error = %err, "write to MQTT broker failed");
                        let frame = ControlFrame::error(err.to_string());
                        let _ = ws_tx.send(Message::text(frame.to_json())).await;
                        let _ = ws_tx.close().await;
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    // Client is gone: flush in-flight writes, then FIN.
                    let _ = broker_tx.shutdown().await;
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::warn!(session = %id, error = %err, "WebSocket error");
                    let _ = broker_tx.shutdown().await;
                    break;
                }
            },
            read = broker_rx.read(&mut buf) => match read {
                Ok(0) => {
                    tracing::info!(session = %id, "MQTT broker connection closed");
                    let _ = ws_tx.close().await;
                    break;
                }
                Ok(n) => {
                    let chunk = buf.get(..n).unwrap_or_default();
                    if ws_tx.send(Message::binary(chunk.to_vec())).await.is_err() {
                        let _ = broker_tx.shutdown().await;
                        break;
                    }
                }
                Err(err) => {
                    tracing::error!(session = %id, error = %err, "MQTT broker connection error");
                    let frame = ControlFrame::error(err.to_string());
                    let _ = ws_tx.send(Message::text(frame.to_json())).await;
                    let _ = ws_tx.close().await;
                    break;
                }
            },
        }
    }
}

/// Sends a JSON control frame to the client.
async fn send_control(socket: &mut WebSocket, frame: &ControlFrame) -> Result<(), axum::Error> {
    socket.send(Message::text(frame.to_json())).await
}

/// Drains an inert session: with no broker socket, every further message is
/// dropped until the client closes.
async fn drain(mut socket: WebSocket, id: Uuid) {
    let mut dropped: u64 = 0;
    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(Message::Binary(_) | Message::Text(_)) => dropped += 1,
            Ok(_) => {}
        }
    }
    if dropped > 0 {
        tracing::debug!(session = %id, dropped, "dropped messages on inert relay session");
    }
}
