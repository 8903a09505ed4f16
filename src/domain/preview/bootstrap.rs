//! Bootstrap document rendering.
//!
//! The bootstrap payload is the page the host displays for a preview. It
//! embeds the viewer in a full-size frame and hands it the artifact path and
//! the bridge endpoint as query parameters, which makes the viewer connect
//! back to the bridge once loaded.
//!
//! Rendering is pure: the same inputs always produce the same document, and
//! nothing is cached between calls.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use super::identity::ArtifactIdentity;

/// Address a rendering surface uses to reach the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeEndpoint {
    scheme: String,
    addr: SocketAddr,
}

impl BridgeEndpoint {
    pub fn new(scheme: impl Into<String>, addr: SocketAddr) -> Self {
        Self {
            scheme: scheme.into(),
            addr,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl fmt::Display for BridgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.addr)
    }
}

/// A rendered bootstrap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPayload(String);

impl BootstrapPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BootstrapPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders the bootstrap document for an artifact.
///
/// `viewer` is the location of the viewer page the frame loads.
pub fn render_bootstrap(
    artifact: &ArtifactIdentity,
    endpoint: &BridgeEndpoint,
    viewer: &Path,
) -> BootstrapPayload {
    let file = encode_path(artifact.as_path());
    let viewer = encode_path(viewer);

    BootstrapPayload(format!(
        r#"
<!DOCTYPE html><html><head></head>
<body>
<iframe class="preview-panel" src="{viewer}?file={file}&server={endpoint}&path={file}" style="position:absolute; border: none; left: 0; top: 0; width: 100%; height: 100%;"></iframe>
</body>
</html>"#
    ))
}

/// Percent-encodes each path segment, keeping the separators readable.
fn encode_path(path: &Path) -> String {
    path.to_string_lossy()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
