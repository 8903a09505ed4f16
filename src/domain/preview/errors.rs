//! Error types for the preview domain.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors that escape the bridge to callers of server-dependent operations.
///
/// Per-message and per-connection failures never surface here; they are
/// contained at the bridge boundary and only logged.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The loopback endpoint could not be acquired.
    #[error("Failed to bind preview bridge on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Content was requested before the bridge finished binding.
    #[error("Preview bridge is not listening yet")]
    ServerNotReady,

    /// No source document was given and the host has no active document.
    #[error("No active document to preview")]
    NoActiveDocument,

    /// The editor host refused a display request.
    #[error("Host request failed: {0}")]
    Host(String),

    /// The given path cannot be turned into a preview identity.
    #[error("Invalid source document '{path}': {reason}")]
    InvalidSource { path: String, reason: String },
}

impl PreviewError {
    /// Creates an invalid source error.
    pub fn invalid_source(path: impl Into<String>, reason: impl Into<String>) -> Self {
        PreviewError::InvalidSource {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_mentions_address() {
        let err = PreviewError::Bind {
            addr: "127.0.0.1:0".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err.to_string().contains("127.0.0.1:0"));
    }

    #[test]
    fn invalid_source_displays_reason() {
        let err = PreviewError::invalid_source("main", "not absolute");
        assert_eq!(err.to_string(), "Invalid source document 'main': not absolute");
    }
}
