//! Relays mapper outcomes to the editor host.
//!
//! A successful lookup moves the editor to the mapped source line. A failed
//! one writes the captured output to the host's diagnostic log and raises an
//! error notification carrying the exit code.

use std::sync::Arc;

use crate::domain::preview::{MapperQuery, MapperResult};
use crate::ports::{EditorHost, PositionMapper};

/// Runs mapper queries and reports their outcome to the host.
pub struct SyncRelay {
    mapper: Arc<dyn PositionMapper>,
    host: Arc<dyn EditorHost>,
}

impl SyncRelay {
    pub fn new(mapper: Arc<dyn PositionMapper>, host: Arc<dyn EditorHost>) -> Self {
        Self { mapper, host }
    }

    /// Resolve `query` and act on the result.
    ///
    /// Always returns the terminal result; host failures are logged only.
    pub async fn relay(&self, query: MapperQuery) -> MapperResult {
        let result = self.mapper.invoke(&query).await;

        match &result {
            MapperResult::Mapped(location) => {
                tracing::info!(
                    page = query.page,
                    location = %location,
                    "Mapped preview position to source"
                );
                if let Err(e) = self.host.reveal_source(location).await {
                    tracing::warn!(location = %location, "Host could not reveal source: {}", e);
                }
            }
            MapperResult::Failed(report) => {
                tracing::warn!(
                    page = query.page,
                    kind = ?report.kind,
                    exit_code = ?report.exit_code,
                    "Position mapping failed"
                );
                self.host.show_diagnostics(&report.diagnostics);
                self.host.show_error(&report.notification());
            }
        }

        result
    }
}
