//! EditorHost port - The editor process the bridge reports to.
//!
//! The bridge never touches editor windows directly. Everything it needs
//! from the editor (opening a document, focusing a line, showing the
//! preview, surfacing errors) goes through this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::preview::{DisplaySlot, PreviewUri, SourceDocument, SourceLocation};

/// Errors reported by the host when a request cannot be honoured.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Host rejected request: {0}")]
    Rejected(String),
}

/// Port for the editor hosting the preview.
///
/// # Contract
///
/// - `reveal_source` opens the document if needed and moves the cursor to
///   the location.
/// - `show_diagnostics` replaces the contents of the host's diagnostic log
///   and brings it into view.
/// - `show_error` raises a user-visible error notification.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Open or focus the source document at `location`.
    async fn reveal_source(&self, location: &SourceLocation) -> Result<(), HostError>;

    /// Open or focus a source document, reusing a visible editor if any.
    async fn show_document(&self, source: &SourceDocument) -> Result<(), HostError>;

    /// Display the preview tracked under `preview` in `slot`.
    async fn show_preview(
        &self,
        preview: &PreviewUri,
        slot: DisplaySlot,
        title: &str,
    ) -> Result<(), HostError>;

    /// The document in the active editor, if any.
    fn active_document(&self) -> Option<SourceDocument>;

    /// The slot of the active editor, if any.
    fn active_slot(&self) -> Option<DisplaySlot>;

    /// Replace the diagnostic log with `text` and show it.
    fn show_diagnostics(&self, text: &str);

    /// Raise an error notification.
    fn show_error(&self, message: &str);
}
