//! Mock position mapper for testing.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::preview::{MapperQuery, MapperResult};
use crate::ports::PositionMapper;

/// Position mapper returning a scripted result.
///
/// Records every query it receives. An optional delay simulates a slow
/// mapper so tests can check that other work is not blocked behind it.
#[derive(Debug)]
pub struct MockPositionMapper {
    result: MapperResult,
    delay: Option<Duration>,
    queries: Mutex<Vec<MapperQuery>>,
}

impl MockPositionMapper {
    /// Mapper that answers every query with `result`.
    pub fn returning(result: MapperResult) -> Self {
        Self {
            result,
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<MapperQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl PositionMapper for MockPositionMapper {
    async fn invoke(&self, query: &MapperQuery) -> MapperResult {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}
