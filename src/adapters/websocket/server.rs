//! Bridge server lifecycle.
//!
//! Owns the loopback listener, the client registry and the published
//! endpoint. Each `start` binds a fresh ephemeral port; `stop` closes every
//! connection and releases it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::application::SyncRelay;
use crate::config::BridgeConfig;
use crate::domain::preview::{ArtifactIdentity, BridgeEndpoint, PreviewError};
use crate::ports::BridgeEndpointSource;

use super::handler::{bridge_router, BridgeState};
use super::messages::ServerMessage;
use super::registry::ClientRegistry;

/// Time allowed for the listener task to wind down on `stop`.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// A bound listener and the switch that stops it.
struct RunningBridge {
    endpoint: BridgeEndpoint,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Loopback WebSocket server brokering rendering surfaces and the host.
///
/// # Example
///
/// ```ignore
/// let server = BridgeServer::new(&config.bridge, relay);
/// let endpoint = server.start().await?;
/// let provider = PreviewContentProvider::new(
///     Arc::new(server.endpoint_handle()),
///     host,
///     &config.preview,
/// );
/// // ...
/// server.stop().await;
/// ```
pub struct BridgeServer {
    config: BridgeConfig,
    registry: Arc<ClientRegistry>,
    relay: Arc<SyncRelay>,
    endpoint: watch::Sender<Option<BridgeEndpoint>>,
    running: Mutex<Option<RunningBridge>>,
}

impl BridgeServer {
    pub fn new(config: &BridgeConfig, relay: Arc<SyncRelay>) -> Self {
        let (endpoint, _) = watch::channel(None);
        Self {
            config: config.clone(),
            registry: Arc::new(ClientRegistry::new()),
            relay,
            endpoint,
            running: Mutex::new(None),
        }
    }

    /// Bind an ephemeral loopback port and start accepting surfaces.
    ///
    /// Starting a running server returns its current endpoint.
    ///
    /// # Errors
    ///
    /// `PreviewError::Bind` if no port could be acquired.
    pub async fn start(&self) -> Result<BridgeEndpoint, PreviewError> {
        self.start_at(self.config.bind_addr()).await
    }

    async fn start_at(&self, addr: SocketAddr) -> Result<BridgeEndpoint, PreviewError> {
        let mut running = self.running.lock().await;
        if let Some(bridge) = running.as_ref() {
            return Ok(bridge.endpoint.clone());
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| PreviewError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| PreviewError::Bind { addr, source })?;
        let endpoint = BridgeEndpoint::new(&self.config.scheme, local_addr);

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let router = bridge_router(BridgeState {
            registry: self.registry.clone(),
            relay: self.relay.clone(),
            outbound_capacity: self.config.outbound_capacity,
            shutdown: shutdown_rx.clone(),
        });

        let task = tokio::spawn(async move {
            let signal = async move {
                // A dropped sender also means stop.
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(signal)
                .await
            {
                tracing::error!("Preview bridge terminated: {}", e);
            }
        });

        self.endpoint.send_replace(Some(endpoint.clone()));
        tracing::info!(endpoint = %endpoint, "Preview bridge listening");

        *running = Some(RunningBridge {
            endpoint: endpoint.clone(),
            shutdown,
            task,
        });
        Ok(endpoint)
    }

    /// Close every connection and release the port.
    ///
    /// Stopping a server that is not running does nothing.
    pub async fn stop(&self) {
        let Some(bridge) = self.running.lock().await.take() else {
            return;
        };

        self.endpoint.send_replace(None);
        bridge.shutdown.send_replace(true);

        let mut task = bridge.task;
        if tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
            tracing::warn!(endpoint = %bridge.endpoint, "Preview bridge did not stop in time, aborting");
            task.abort();
        }

        self.registry.clear().await;
        tracing::info!(endpoint = %bridge.endpoint, "Preview bridge stopped");
    }

    /// Current endpoint, if the server is listening.
    pub fn endpoint(&self) -> Option<BridgeEndpoint> {
        self.endpoint.borrow().clone()
    }

    /// Read-only view of the endpoint for content providers.
    pub fn endpoint_handle(&self) -> EndpointHandle {
        EndpointHandle {
            endpoint: self.endpoint.subscribe(),
        }
    }

    /// Ask the surface displaying `artifact` to reload it.
    ///
    /// Returns whether a live surface accepted the push.
    pub async fn notify_refresh(&self, artifact: &ArtifactIdentity) -> bool {
        let Some(connection) = self.registry.lookup(artifact).await else {
            tracing::trace!(path = %artifact, "No surface to refresh");
            return false;
        };

        let pushed = connection.push(ServerMessage::Refresh {
            path: artifact.key(),
        });
        tracing::debug!(
            path = %artifact,
            client_id = %connection.id(),
            pushed,
            "Refresh requested"
        );
        pushed
    }

    /// Number of registered artifacts.
    pub async fn client_count(&self) -> usize {
        self.registry.len().await
    }
}

/// Endpoint view handed to components that embed the bridge address.
#[derive(Debug, Clone)]
pub struct EndpointHandle {
    endpoint: watch::Receiver<Option<BridgeEndpoint>>,
}

#[async_trait]
impl BridgeEndpointSource for EndpointHandle {
    fn current(&self) -> Result<BridgeEndpoint, PreviewError> {
        self.endpoint
            .borrow()
            .clone()
            .ok_or(PreviewError::ServerNotReady)
    }

    async fn ready(&self) -> Result<BridgeEndpoint, PreviewError> {
        let mut endpoint = self.endpoint.clone();
        let ready = endpoint
            .wait_for(Option::is_some)
            .await
            .map(|current| current.clone());
        ready.ok().flatten().ok_or(PreviewError::ServerNotReady)
    }
}
