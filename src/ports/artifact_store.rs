//! ArtifactStore port - Existence checks for rendered artifacts.

use async_trait::async_trait;

use crate::domain::preview::ArtifactIdentity;

/// Port for querying durable storage about artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Whether the artifact currently exists.
    ///
    /// Errors while checking are reported as "does not exist".
    async fn exists(&self, artifact: &ArtifactIdentity) -> bool;
}
