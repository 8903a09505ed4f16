//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `EditorHost` - The editor that displays previews and source documents
//! - `PositionMapper` - Translates preview positions into source locations
//! - `ArtifactStore` - Existence checks for rendered artifacts
//! - `ArtifactCompiler` - Produces rendered artifacts on demand
//!
//! ## Bridge Ports
//!
//! - `BridgeEndpointSource` - Where the bridge is currently listening

mod artifact_compiler;
mod artifact_store;
mod bridge_endpoint;
mod editor_host;
mod position_mapper;

pub use artifact_compiler::{ArtifactCompiler, CompileError};
pub use artifact_store::ArtifactStore;
pub use bridge_endpoint::BridgeEndpointSource;
pub use editor_host::{EditorHost, HostError};
pub use position_mapper::PositionMapper;
