//! Preview launcher.
//!
//! Opens the preview of a source document in an editor slot, compiling the
//! artifact in the background when it does not exist yet, and reveals the
//! source behind an open preview.

use std::sync::Arc;

use crate::config::PreviewConfig;
use crate::domain::preview::{DisplaySlot, PreviewError, PreviewUri, SourceDocument};
use crate::ports::{ArtifactCompiler, ArtifactStore, EditorHost};

use super::content_provider::PreviewContentProvider;

/// Orchestrates showing previews in the host.
pub struct PreviewLauncher {
    host: Arc<dyn EditorHost>,
    store: Arc<dyn ArtifactStore>,
    compiler: Arc<dyn ArtifactCompiler>,
    provider: Arc<PreviewContentProvider>,
    title: String,
}

impl PreviewLauncher {
    pub fn new(
        host: Arc<dyn EditorHost>,
        store: Arc<dyn ArtifactStore>,
        compiler: Arc<dyn ArtifactCompiler>,
        provider: Arc<PreviewContentProvider>,
        config: &PreviewConfig,
    ) -> Self {
        Self {
            host,
            store,
            compiler,
            provider,
            title: config.title.clone(),
        }
    }

    /// Show the preview of `source` in `slot`.
    ///
    /// Without a source the host's active document is previewed. Without a
    /// slot the one after the host's active slot is used. A missing artifact
    /// starts a compile but does not delay the preview; the surface picks up
    /// the artifact once it is written.
    ///
    /// # Errors
    ///
    /// - `PreviewError::NoActiveDocument` if no source was given and none is active
    /// - `PreviewError::Host` if the host refuses to show the preview
    pub async fn open(
        &self,
        source: Option<SourceDocument>,
        slot: Option<DisplaySlot>,
    ) -> Result<PreviewUri, PreviewError> {
        let source = source
            .or_else(|| self.host.active_document())
            .ok_or(PreviewError::NoActiveDocument)?;
        let slot = slot.unwrap_or_else(|| DisplaySlot::next_after(self.host.active_slot()));

        let artifact = self.provider.artifact_for(&source);
        if !self.store.exists(&artifact).await {
            tracing::info!(path = %artifact, "Artifact missing, compiling before preview");
            let compiler = self.compiler.clone();
            tokio::spawn(async move {
                match compiler.compile().await {
                    Ok(()) => tracing::debug!(path = %artifact, "Compile finished"),
                    Err(e) => tracing::warn!(path = %artifact, "Compile failed: {}", e),
                }
            });
        }

        let preview = self.provider.preview_uri(&source);
        self.host
            .show_preview(&preview, slot, &self.title)
            .await
            .map_err(|e| PreviewError::Host(e.to_string()))?;

        tracing::debug!(preview = %preview, slot = %slot, "Preview opened");
        Ok(preview)
    }

    /// Reveal the source document behind `preview`.
    ///
    /// # Errors
    ///
    /// `PreviewError::Host` if the host cannot open the document.
    pub async fn source(&self, preview: &PreviewUri) -> Result<(), PreviewError> {
        let source = preview.source();
        self.host
            .show_document(source)
            .await
            .map_err(|e| PreviewError::Host(e.to_string()))?;
        tracing::debug!(source = %source, "Revealed preview source");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::compiler::MockCompiler;
    use crate::adapters::host::{HostCall, MockEditorHost};
    use crate::adapters::storage::InMemoryArtifactStore;
    use crate::domain::preview::{ArtifactIdentity, BridgeEndpoint};
    use crate::ports::{BridgeEndpointSource, HostError};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedEndpoint;

    #[async_trait]
    impl BridgeEndpointSource for FixedEndpoint {
        fn current(&self) -> Result<BridgeEndpoint, PreviewError> {
            Ok(BridgeEndpoint::new("ws", ([127, 0, 0, 1], 4711).into()))
        }

        async fn ready(&self) -> Result<BridgeEndpoint, PreviewError> {
            self.current()
        }
    }

    struct Fixture {
        host: Arc<MockEditorHost>,
        store: Arc<InMemoryArtifactStore>,
        compiler: Arc<MockCompiler>,
        launcher: PreviewLauncher,
    }

    fn fixture(host: MockEditorHost) -> Fixture {
        fixture_with_compiler(host, MockCompiler::new())
    }

    fn fixture_with_compiler(host: MockEditorHost, compiler: MockCompiler) -> Fixture {
        let host = Arc::new(host);
        let store = Arc::new(InMemoryArtifactStore::new());
        let compiler = Arc::new(compiler);
        let config = PreviewConfig::default();
        let provider = Arc::new(PreviewContentProvider::new(
            Arc::new(FixedEndpoint),
            host.clone(),
            &config,
        ));
        let launcher = PreviewLauncher::new(
            host.clone(),
            store.clone(),
            compiler.clone(),
            provider,
            &config,
        );
        Fixture {
            host,
            store,
            compiler,
            launcher,
        }
    }

    fn source(path: &str) -> SourceDocument {
        SourceDocument::new(path).unwrap()
    }

    #[tokio::test]
    async fn open_shows_preview_in_requested_slot() {
        let f = fixture(MockEditorHost::new());
        f.store
            .insert(&ArtifactIdentity::from_announced("/proj/main.pdf"))
            .await;

        let preview = f
            .launcher
            .open(Some(source("/proj/main.tex")), Some(DisplaySlot::Three))
            .await
            .unwrap();

        assert_eq!(preview.to_string(), "latex-workshop-preview:///proj/main.tex");
        assert_eq!(
            f.host.calls(),
            vec![HostCall::ShowPreview {
                preview,
                slot: DisplaySlot::Three,
                title: "Preview".to_string(),
            }]
        );
        assert_eq!(f.compiler.runs(), 0);
    }

    #[tokio::test]
    async fn open_rotates_from_active_slot() {
        let f = fixture(MockEditorHost::new().with_active_slot(DisplaySlot::Two));
        f.store
            .insert(&ArtifactIdentity::from_announced("/proj/main.pdf"))
            .await;

        f.launcher
            .open(Some(source("/proj/main.tex")), None)
            .await
            .unwrap();

        assert!(matches!(
            f.host.calls().as_slice(),
            [HostCall::ShowPreview {
                slot: DisplaySlot::Three,
                ..
            }]
        ));
    }

    #[tokio::test]
    async fn missing_artifact_triggers_compile_without_blocking() {
        let f = fixture(MockEditorHost::new());

        f.launcher
            .open(Some(source("/proj/main.tex")), Some(DisplaySlot::One))
            .await
            .unwrap();

        assert_eq!(f.host.calls().len(), 1);
        assert!(f.compiler.wait_for_runs(1, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn failed_compile_is_only_logged() {
        let f = fixture_with_compiler(MockEditorHost::new(), MockCompiler::failing(12));

        let preview = f
            .launcher
            .open(Some(source("/proj/main.tex")), Some(DisplaySlot::Two))
            .await
            .unwrap();

        assert!(f.compiler.wait_for_runs(1, Duration::from_secs(2)).await);
        assert!(f.host.errors().is_empty());
        assert_eq!(
            f.host.calls(),
            vec![HostCall::ShowPreview {
                preview,
                slot: DisplaySlot::Two,
                title: "Preview".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn open_defaults_to_active_document() {
        let f = fixture(MockEditorHost::new().with_active_document(source("/proj/active.tex")));

        let preview = f.launcher.open(None, None).await.unwrap();

        assert_eq!(
            preview.source().as_path(),
            std::path::Path::new("/proj/active.tex")
        );
    }

    #[tokio::test]
    async fn open_without_any_document_fails() {
        let f = fixture(MockEditorHost::new());

        let result = f.launcher.open(None, None).await;

        assert!(matches!(result, Err(PreviewError::NoActiveDocument)));
        assert!(f.host.calls().is_empty());
        assert_eq!(f.compiler.runs(), 0);
    }

    #[tokio::test]
    async fn host_rejection_surfaces_as_host_error() {
        let f = fixture(
            MockEditorHost::new().rejecting(HostError::Rejected("no slot".to_string())),
        );

        let result = f
            .launcher
            .open(Some(source("/proj/main.tex")), Some(DisplaySlot::One))
            .await;

        assert!(matches!(result, Err(PreviewError::Host(_))));
    }

    #[tokio::test]
    async fn source_reveals_document_behind_preview() {
        let f = fixture(MockEditorHost::new());
        let preview = PreviewUri::parse("latex-workshop-preview:///proj/main.tex").unwrap();

        f.launcher.source(&preview).await.unwrap();

        assert_eq!(
            f.host.calls(),
            vec![HostCall::ShowDocument(source("/proj/main.tex"))]
        );
    }
}
