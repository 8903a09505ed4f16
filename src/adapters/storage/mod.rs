//! Artifact Storage Adapters
//!
//! Implementations of the ArtifactStore port for checking whether a rendered
//! artifact exists.
//!
//! ## Available Adapters
//!
//! - **LocalArtifactStore** - Stats the artifact on the local filesystem
//! - **InMemoryArtifactStore** - Tracks artifacts in memory (testing)

mod in_memory_artifact_store;
mod local_artifact_store;

pub use in_memory_artifact_store::InMemoryArtifactStore;
pub use local_artifact_store::LocalArtifactStore;
