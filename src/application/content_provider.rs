//! Preview content provider.
//!
//! Produces the bootstrap document the host displays for a preview and
//! announces when that document should be fetched again. The document is
//! rendered fresh on every request so it always carries the bridge's current
//! address.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::PreviewConfig;
use crate::domain::preview::{
    render_bootstrap, ArtifactIdentity, ArtifactNaming, BootstrapPayload, ChangeNotification,
    PreviewError, PreviewUri, SourceDocument,
};
use crate::ports::{BridgeEndpointSource, EditorHost};

/// Buffered notifications per subscriber before the oldest are dropped.
const NOTIFICATION_CAPACITY: usize = 64;

/// Serves bootstrap documents and change notifications for previews.
///
/// # Example
///
/// ```ignore
/// let provider = PreviewContentProvider::new(endpoint, host, &config.preview);
/// let mut changes = provider.subscribe();
///
/// let html = provider.provide(&source)?;
/// provider.update(Some(&source));
/// let changed = changes.recv().await?;
/// ```
pub struct PreviewContentProvider {
    endpoint: Arc<dyn BridgeEndpointSource>,
    host: Arc<dyn EditorHost>,
    naming: ArtifactNaming,
    viewer: PathBuf,
    scheme: String,
    changes: broadcast::Sender<ChangeNotification>,
}

impl PreviewContentProvider {
    pub fn new(
        endpoint: Arc<dyn BridgeEndpointSource>,
        host: Arc<dyn EditorHost>,
        config: &PreviewConfig,
    ) -> Self {
        let (changes, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            endpoint,
            host,
            naming: config.naming(),
            viewer: config.viewer_path.clone(),
            scheme: config.uri_scheme.clone(),
            changes,
        }
    }

    /// Artifact rendered from `source`.
    pub fn artifact_for(&self, source: &SourceDocument) -> ArtifactIdentity {
        self.naming.derive(source)
    }

    /// Identity the host tracks the preview of `source` under.
    pub fn preview_uri(&self, source: &SourceDocument) -> PreviewUri {
        PreviewUri::new(&self.scheme, source.clone())
    }

    /// Render the bootstrap document for `source`.
    ///
    /// # Errors
    ///
    /// `PreviewError::ServerNotReady` if the bridge is not listening yet.
    pub fn provide(&self, source: &SourceDocument) -> Result<BootstrapPayload, PreviewError> {
        let endpoint = self.endpoint.current()?;
        let artifact = self.artifact_for(source);
        tracing::debug!(artifact = %artifact, endpoint = %endpoint, "Rendering preview bootstrap");
        Ok(render_bootstrap(&artifact, &endpoint, &self.viewer))
    }

    /// Like [`provide`](Self::provide), but waits for the bridge to bind first.
    pub async fn provide_when_ready(
        &self,
        source: &SourceDocument,
    ) -> Result<BootstrapPayload, PreviewError> {
        self.endpoint.ready().await?;
        self.provide(source)
    }

    /// Announce that the preview of `source` changed.
    ///
    /// Without a source the host's active document is used; if there is none
    /// the call does nothing. Notifications are not replayed to subscribers
    /// that join later.
    pub fn update(&self, source: Option<&SourceDocument>) {
        let source = match source.cloned().or_else(|| self.host.active_document()) {
            Some(source) => source,
            None => {
                tracing::debug!("Preview update requested without an active document");
                return;
            }
        };

        let notification = ChangeNotification::now(self.preview_uri(&source));
        // No subscribers is fine.
        let delivered = self.changes.send(notification).unwrap_or(0);
        tracing::trace!(source = %source, subscribers = delivered, "Preview change announced");
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
        self.changes.subscribe()
    }
}
