//! PositionMapper port - Interface for rendered-to-source position lookup.
//!
//! The mapper translates a click on a page of the rendered artifact into a
//! location in the source document. The production adapter shells out to
//! SyncTeX; tests script the outcome directly.

use async_trait::async_trait;

use crate::domain::preview::{MapperQuery, MapperResult};

/// Port for resolving rendered positions to source locations.
///
/// # Contract
///
/// `invoke` always resolves to a terminal [`MapperResult`]. Spawn failures,
/// non-zero exits and timeouts are reported as `MapperResult::Failed`, never
/// as a panic or a dropped future.
#[async_trait]
pub trait PositionMapper: Send + Sync {
    /// Resolve one query.
    async fn invoke(&self, query: &MapperQuery) -> MapperResult;
}
