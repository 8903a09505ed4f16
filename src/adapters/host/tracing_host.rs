//! Host adapter for running the bridge standalone.
//!
//! Without an editor attached, every host request is written to the log.
//! Useful for the `preview-sync` binary and for exercising a viewer against
//! the bridge by hand.

use async_trait::async_trait;

use crate::domain::preview::{DisplaySlot, PreviewUri, SourceDocument, SourceLocation};
use crate::ports::{EditorHost, HostError};

/// Editor host that logs requests instead of acting on them.
///
/// There is no editor state, so no document or slot is ever active.
#[derive(Debug, Clone, Default)]
pub struct TracingHost;

impl TracingHost {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EditorHost for TracingHost {
    async fn reveal_source(&self, location: &SourceLocation) -> Result<(), HostError> {
        tracing::info!(
            path = %location.path.display(),
            line = location.line,
            column = location.column,
            "Reveal source"
        );
        Ok(())
    }

    async fn show_document(&self, source: &SourceDocument) -> Result<(), HostError> {
        tracing::info!(source = %source, "Show document");
        Ok(())
    }

    async fn show_preview(
        &self,
        preview: &PreviewUri,
        slot: DisplaySlot,
        title: &str,
    ) -> Result<(), HostError> {
        tracing::info!(preview = %preview, slot = %slot, title, "Show preview");
        Ok(())
    }

    fn active_document(&self) -> Option<SourceDocument> {
        None
    }

    fn active_slot(&self) -> Option<DisplaySlot> {
        None
    }

    fn show_diagnostics(&self, text: &str) {
        tracing::warn!(target: "preview_sync::diagnostics", "{}", text);
    }

    fn show_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
