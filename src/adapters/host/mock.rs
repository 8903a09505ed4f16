//! Mock editor host for testing.
//!
//! Records every request the bridge makes so tests can assert on them, and
//! lets tests await requests that arrive from background tasks.
//!
//! # Example
//!
//! ```ignore
//! let host = Arc::new(MockEditorHost::new().with_active_slot(DisplaySlot::One));
//!
//! launcher.open(Some(source), None).await?;
//!
//! assert_eq!(host.calls(), vec![HostCall::ShowPreview { .. }]);
//! ```

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::preview::{DisplaySlot, PreviewUri, SourceDocument, SourceLocation};
use crate::ports::{EditorHost, HostError};

/// A request the host received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    RevealSource(SourceLocation),
    ShowDocument(SourceDocument),
    ShowPreview {
        preview: PreviewUri,
        slot: DisplaySlot,
        title: String,
    },
    Diagnostics(String),
    Error(String),
}

/// Mock editor host.
#[derive(Debug, Default)]
pub struct MockEditorHost {
    calls: Mutex<Vec<HostCall>>,
    active_document: Option<SourceDocument>,
    active_slot: Option<DisplaySlot>,
    reject_with: Option<HostError>,
    recorded: Notify,
}

impl MockEditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `source` as the active document.
    pub fn with_active_document(mut self, source: SourceDocument) -> Self {
        self.active_document = Some(source);
        self
    }

    /// Report `slot` as the active editor's slot.
    pub fn with_active_slot(mut self, slot: DisplaySlot) -> Self {
        self.active_slot = Some(slot);
        self
    }

    /// Fail every async request with `error` (requests are still recorded).
    pub fn rejecting(mut self, error: HostError) -> Self {
        self.reject_with = Some(error);
        self
    }

    /// All recorded requests, oldest first.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded source reveals.
    pub fn revealed(&self) -> Vec<SourceLocation> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::RevealSource(location) => Some(location),
                _ => None,
            })
            .collect()
    }

    /// Recorded error notifications.
    pub fn errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Wait until at least `count` requests were recorded.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub async fn wait_for_calls(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.recorded.notified();
                if self.calls.lock().unwrap_or_else(|e| e.into_inner()).len() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        self.recorded.notify_waiters();
    }

    fn outcome(&self) -> Result<(), HostError> {
        match &self.reject_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EditorHost for MockEditorHost {
    async fn reveal_source(&self, location: &SourceLocation) -> Result<(), HostError> {
        self.record(HostCall::RevealSource(location.clone()));
        self.outcome()
    }

    async fn show_document(&self, source: &SourceDocument) -> Result<(), HostError> {
        self.record(HostCall::ShowDocument(source.clone()));
        self.outcome()
    }

    async fn show_preview(
        &self,
        preview: &PreviewUri,
        slot: DisplaySlot,
        title: &str,
    ) -> Result<(), HostError> {
        self.record(HostCall::ShowPreview {
            preview: preview.clone(),
            slot,
            title: title.to_string(),
        });
        self.outcome()
    }

    fn active_document(&self) -> Option<SourceDocument> {
        self.active_document.clone()
    }

    fn active_slot(&self) -> Option<DisplaySlot> {
        self.active_slot
    }

    fn show_diagnostics(&self, text: &str) {
        self.record(HostCall::Diagnostics(text.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.record(HostCall::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn location() -> SourceLocation {
        SourceLocation {
            path: PathBuf::from("/proj/main.tex"),
            line: 3,
            column: 0,
        }
    }

    #[tokio::test]
    async fn records_calls_in_order() {
        let host = MockEditorHost::new();

        host.reveal_source(&location()).await.unwrap();
        host.show_error("boom");

        assert_eq!(
            host.calls(),
            vec![HostCall::RevealSource(location()), HostCall::Error("boom".to_string())]
        );
        assert_eq!(host.errors(), vec!["boom".to_string()]);
    }

    #[tokio::test]
    async fn rejecting_host_still_records() {
        let host = MockEditorHost::new().rejecting(HostError::Rejected("no".to_string()));

        assert!(host.reveal_source(&location()).await.is_err());
        assert_eq!(host.revealed(), vec![location()]);
    }

    #[tokio::test]
    async fn wait_for_calls_sees_background_requests() {
        let host = Arc::new(MockEditorHost::new());
        let background = host.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            background.show_error("late");
        });

        assert!(host.wait_for_calls(1, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn wait_for_calls_times_out() {
        let host = MockEditorHost::new();
        assert!(!host.wait_for_calls(1, Duration::from_millis(20)).await);
    }
}
