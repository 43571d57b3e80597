//! Explicit registry of live relay sessions.
//!
//! One entry per accepted WebSocket. A session inserts itself on accept,
//! records its state transitions, and removes itself on close, so the full
//! lifecycle is observable from outside the session task (the live count is
//! surfaced in `/api/system/info`).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::session::SessionState;

/// Metadata tracked for one live relay session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Remote address of the browser client.
    pub peer: String,
    /// Current lifecycle state.
    pub state: SessionState,
    /// Broker `host:port`, present once the handshake has succeeded.
    pub broker: Option<String>,
    /// Time the WebSocket was accepted.
    pub opened_at: DateTime<Utc>,
}

/// Central bookkeeping for all live relay sessions.
///
/// Sessions never share any state beyond this map; entries are appended on
/// accept and removed on close.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionInfo>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a freshly accepted session in `AwaitingHandshake`.
    pub async fn insert(&self, id: Uuid, peer: String) {
        let mut map = self.sessions.write().await;
        map.insert(
            id,
            SessionInfo {
                peer,
                state: SessionState::AwaitingHandshake,
                broker: None,
                opened_at: Utc::now(),
            },
        );
    }

    /// Records a state transition. Unknown IDs are ignored (the session
    /// already removed itself).
    pub async fn set_state(&self, id: Uuid, state: SessionState) {
        if let Some(info) = self.sessions.write().await.get_mut(&id) {
            info.state = state;
        }
    }

    /// Marks a session as relaying to the given broker endpoint.
    pub async fn set_relaying(&self, id: Uuid, broker: String) {
        if let Some(info) = self.sessions.write().await.get_mut(&id) {
            info.state = SessionState::Relaying;
            info.broker = Some(broker);
        }
    }

    /// Removes a session, returning its final metadata.
    pub async fn remove(&self, id: Uuid) -> Option<SessionInfo> {
        self.sessions.write().await.remove(&id)
    }

    /// Returns the metadata of a live session.
    pub async fn get(&self, id: Uuid) -> Option<SessionInfo> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Returns the number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no session is live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
