//! In-Memory Artifact Store
//!
//! Tracks which artifacts exist without touching the filesystem.
//! Useful for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::preview::ArtifactIdentity;
use crate::ports::ArtifactStore;

/// In-memory set of existing artifacts
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactStore {
    artifacts: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryArtifactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an artifact as present
    pub async fn insert(&self, artifact: &ArtifactIdentity) {
        self.artifacts.write().await.insert(artifact.key());
    }

    /// Mark an artifact as gone
    pub async fn remove(&self, artifact: &ArtifactIdentity) {
        self.artifacts.write().await.remove(&artifact.key());
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn exists(&self, artifact: &ArtifactIdentity) -> bool {
        self.artifacts.read().await.contains(&artifact.key())
    }
}
