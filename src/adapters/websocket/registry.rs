//! Client registry for artifact-based message routing.
//!
//! Each rendering surface announces the artifact it displays with an `open`
//! message. The registry remembers the most recent surface per artifact so
//! that pushes for that artifact reach the right client.
//!
//! ```text
//! /proj/main.pdf     → client-a
//! /proj/appendix.pdf → client-c
//! ```
//!
//! A later `open` for the same artifact replaces the earlier entry. The
//! displaced connection stays open; it simply stops being routable.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::domain::preview::ArtifactIdentity;

use super::messages::ServerMessage;

/// Unique identifier for a rendering-surface connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to one connected rendering surface.
///
/// Cloning the handle does not duplicate the connection; all clones push to
/// the same outbound queue. The queue closes when the connection's writer
/// task ends, which is how the registry recognises stale entries.
#[derive(Debug, Clone)]
pub struct ClientConnection {
    id: ClientId,
    outbound: mpsc::Sender<ServerMessage>,
}

impl ClientConnection {
    pub fn new(outbound: mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id: ClientId::new(),
            outbound,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Whether the underlying connection has gone away.
    pub fn is_closed(&self) -> bool {
        self.outbound.is_closed()
    }

    /// Queue a frame for the client without waiting.
    ///
    /// Returns `false` if the connection is closed or its queue is full.
    pub fn push(&self, message: ServerMessage) -> bool {
        self.outbound.try_send(message).is_ok()
    }
}

/// Maps artifact identities to the connection currently displaying them.
///
/// # Thread Safety
///
/// Uses `RwLock` since lookups vastly outnumber registrations. All writes go
/// through the bridge server that owns the registry.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<String, ClientConnection>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `identity` with `connection`, replacing any earlier entry.
    ///
    /// Returns the displaced connection, if there was one.
    pub async fn register(
        &self,
        identity: &ArtifactIdentity,
        connection: ClientConnection,
    ) -> Option<ClientConnection> {
        self.clients
            .write()
            .await
            .insert(identity.key(), connection)
    }

    /// Find the live connection for `identity`.
    ///
    /// An entry whose connection has closed is evicted and reported as absent.
    pub async fn lookup(&self, identity: &ArtifactIdentity) -> Option<ClientConnection> {
        let key = identity.key();
        let stale_id = {
            let clients = self.clients.read().await;
            match clients.get(&key) {
                None => return None,
                Some(connection) if !connection.is_closed() => return Some(connection.clone()),
                Some(connection) => connection.id(),
            }
        };

        let mut clients = self.clients.write().await;
        // Re-check: the slot may have been re-registered since the read.
        if clients.get(&key).map(|c| c.id()) == Some(stale_id) {
            clients.remove(&key);
            tracing::trace!(path = %key, client_id = %stale_id, "Evicted stale registry entry");
        }
        clients.get(&key).filter(|c| !c.is_closed()).cloned()
    }

    /// Remove every entry pointing at the given connection.
    ///
    /// Returns the number of entries removed.
    pub async fn remove(&self, client_id: &ClientId) -> usize {
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|_, connection| connection.id() != *client_id);
        before - clients.len()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.clients.write().await.clear();
    }

    /// Number of tracked entries, including stale ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}
