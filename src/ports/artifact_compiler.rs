//! ArtifactCompiler port - Trigger for producing the rendered artifact.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a compile run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Failed to start compiler: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Compiler exited with status {0}")]
    Failed(i32),

    #[error("Compiler was terminated by a signal")]
    Terminated,
}

/// Port for the document compiler.
///
/// Callers treat compilation as fire-and-forget; the result is only logged.
#[async_trait]
pub trait ArtifactCompiler: Send + Sync {
    /// Compile the current project.
    async fn compile(&self) -> Result<(), CompileError>;
}
