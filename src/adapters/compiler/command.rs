//! Command compiler - Implementation of ArtifactCompiler.
//!
//! Runs the configured build tool (`latexmk -pdf` by default) to completion.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::CompilerConfig;
use crate::ports::{ArtifactCompiler, CompileError};

/// Compiles by running an external build command.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandCompiler {
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.clone(),
        }
    }
}

#[async_trait]
impl ArtifactCompiler for CommandCompiler {
    async fn compile(&self) -> Result<(), CompileError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        tracing::debug!(program = %self.program, args = ?self.args, "Starting compiler");
        let output = command.output().await?;

        match output.status.code() {
            Some(0) => Ok(()),
            Some(code) => {
                tracing::debug!(
                    program = %self.program,
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "Compiler failed"
                );
                Err(CompileError::Failed(code))
            }
            None => Err(CompileError::Terminated),
        }
    }
}
