//! Local Filesystem Artifact Store - Implementation of ArtifactStore.

use async_trait::async_trait;
use tokio::fs;

use crate::domain::preview::ArtifactIdentity;
use crate::ports::ArtifactStore;

/// Checks artifacts on the local filesystem.
///
/// Artifact identities are absolute paths, so no base directory is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalArtifactStore;

impl LocalArtifactStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn exists(&self, artifact: &ArtifactIdentity) -> bool {
        match fs::metadata(artifact.as_path()).await {
            Ok(metadata) => metadata.is_file(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::debug!(path = %artifact, "Could not stat artifact: {}", e);
                false
            }
        }
    }
}
