//! BridgeEndpointSource port - Read access to the bridge's bound address.

use async_trait::async_trait;

use crate::domain::preview::{BridgeEndpoint, PreviewError};

/// Port for reading where the bridge is currently listening.
///
/// The address changes whenever the bridge is restarted, so consumers must
/// read it on every use rather than caching it.
#[async_trait]
pub trait BridgeEndpointSource: Send + Sync {
    /// The address the bridge is bound to right now.
    ///
    /// # Errors
    ///
    /// `PreviewError::ServerNotReady` if the bridge is not listening.
    fn current(&self) -> Result<BridgeEndpoint, PreviewError>;

    /// Wait until the bridge is listening and return its address.
    ///
    /// # Errors
    ///
    /// `PreviewError::ServerNotReady` if the bridge was dropped before it
    /// ever became ready.
    async fn ready(&self) -> Result<BridgeEndpoint, PreviewError>;
}
