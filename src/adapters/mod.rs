//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `websocket` - The loopback bridge rendering surfaces connect to
//! - `synctex` - Position mapping through the `synctex` executable
//! - `host` - Editor host implementations (logging, mock)
//! - `compiler` - Artifact compilation through a build command
//! - `storage` - Artifact existence checks

pub mod compiler;
pub mod host;
pub mod storage;
pub mod synctex;
pub mod websocket;

pub use compiler::{CommandCompiler, MockCompiler};
pub use host::{HostCall, MockEditorHost, TracingHost};
pub use storage::{InMemoryArtifactStore, LocalArtifactStore};
pub use synctex::{MockPositionMapper, SynctexMapper};
pub use websocket::{BridgeServer, EndpointHandle};
