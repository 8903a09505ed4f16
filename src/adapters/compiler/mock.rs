//! Mock compiler for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::ports::{ArtifactCompiler, CompileError};

/// Compiler that only counts how often it was asked to run.
#[derive(Debug, Default)]
pub struct MockCompiler {
    runs: AtomicUsize,
    fail_with: Option<i32>,
    ran: Notify,
}

impl MockCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every run as a failure with exit status `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::default()
        }
    }

    /// Number of compile requests so far.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    /// Wait until at least `count` runs were requested.
    pub async fn wait_for_runs(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.ran.notified();
                if self.runs() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }
}

#[async_trait]
impl ArtifactCompiler for MockCompiler {
    async fn compile(&self) -> Result<(), CompileError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.ran.notify_waiters();
        match self.fail_with {
            Some(code) => Err(CompileError::Failed(code)),
            None => Ok(()),
        }
    }
}
