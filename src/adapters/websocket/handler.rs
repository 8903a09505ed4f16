//! WebSocket upgrade handler for rendering-surface connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Open an outbound queue for server pushes
//! 3. Dispatch inbound frames in arrival order until disconnect
//! 4. Drop the connection's registry entries

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tower_http::trace::TraceLayer;

use crate::application::SyncRelay;
use crate::domain::preview::ArtifactIdentity;

use super::{
    messages::{decode, ClientMessage, ServerMessage},
    registry::{ClientConnection, ClientRegistry},
};

/// State shared by every connection of one bridge instance.
#[derive(Clone)]
pub struct BridgeState {
    /// Artifact → connection routing table.
    pub registry: Arc<ClientRegistry>,
    /// Runs click lookups and reports the outcome to the host.
    pub relay: Arc<SyncRelay>,
    /// Queued pushes per connection before further pushes are dropped.
    pub outbound_capacity: usize,
    /// Flips to `true` when the bridge stops.
    pub shutdown: watch::Receiver<bool>,
}

/// What one connection has announced about itself.
struct ConnectionContext {
    connection: ClientConnection,
    artifact: Option<ArtifactIdentity>,
}

/// Handle WebSocket upgrade requests from rendering surfaces.
///
/// Route: `GET /`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<BridgeState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection:
/// - Forwarding queued pushes to the client
/// - Decoding and dispatching client frames
/// - Closing the socket when the bridge stops
/// - Cleanup on disconnect
async fn handle_socket(socket: WebSocket, state: BridgeState) {
    let (mut sender, mut receiver) = socket.split();

    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerMessage>(state.outbound_capacity);
    let connection = ClientConnection::new(outbound_tx);
    let client_id = connection.id();

    tracing::debug!(client_id = %client_id, "Rendering surface connected");

    // Forward queued pushes until the client goes away or the bridge stops
    let mut send_task = {
        let mut shutdown = state.shutdown.clone();
        tokio::spawn(async move {
            if *shutdown.borrow_and_update() {
                let _ = sender.send(Message::Close(None)).await;
                return;
            }
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        let Some(message) = outbound else { break };
                        if let Err(e) = sender.send(Message::Text(message.to_json())).await {
                            tracing::debug!(
                                client_id = %client_id,
                                "Send error, closing connection: {}",
                                e
                            );
                            break;
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            let _ = sender.send(Message::Close(None)).await;
                            break;
                        }
                    }
                }
            }
        })
    };

    // Handle incoming messages from client
    let mut recv_task = {
        let state = state.clone();
        tokio::spawn(async move {
            let mut context = ConnectionContext {
                connection,
                artifact: None,
            };
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => dispatch(&state, &mut context, &text).await,
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(
                            client_id = %client_id,
                            "Received unsupported binary message"
                        );
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // Answered by the protocol layer
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(client_id = %client_id, "Client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(client_id = %client_id, "Receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    let removed = state.registry.remove(&client_id).await;
    tracing::debug!(
        client_id = %client_id,
        entries_removed = removed,
        "Rendering surface disconnected"
    );
}

/// Decode one text frame and act on it.
///
/// Never fails: bad frames are dropped and the connection carries on.
async fn dispatch(state: &BridgeState, context: &mut ConnectionContext, text: &str) {
    let client_id = context.connection.id();

    let message = match decode(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(client_id = %client_id, "Dropping inbound frame: {}", e);
            return;
        }
    };

    match message {
        ClientMessage::Open(open) => {
            let artifact = ArtifactIdentity::from_announced(open.path);
            let displaced = state
                .registry
                .register(&artifact, context.connection.clone())
                .await;
            if let Some(displaced) = displaced.filter(|c| c.id() != client_id) {
                tracing::debug!(
                    path = %artifact,
                    client_id = %client_id,
                    displaced = %displaced.id(),
                    "Artifact re-opened by another surface"
                );
            }
            tracing::debug!(path = %artifact, client_id = %client_id, "Surface opened artifact");
            context.artifact = Some(artifact);
        }
        ClientMessage::Click(click) => match click.to_query(context.artifact.clone()) {
            Ok(query) => {
                let relay = state.relay.clone();
                tokio::spawn(async move {
                    relay.relay(query).await;
                });
            }
            Err(e) => {
                tracing::debug!(client_id = %client_id, "Dropping click: {}", e);
            }
        },
        ClientMessage::Unknown => {
            tracing::trace!(client_id = %client_id, "Ignoring unknown message type");
        }
    }
}

/// Create the bridge router.
///
/// Surfaces connect to the root path of the bound address.
pub fn bridge_router(state: BridgeState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
