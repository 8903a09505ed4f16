//! Compiler configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Compiler invoked when a preview is opened without an artifact
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerConfig {
    /// Executable to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments passed to the compiler
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Working directory; the process's own when unset
    pub working_dir: Option<PathBuf>,
}

impl CompilerConfig {
    /// Validate compiler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.program.trim().is_empty() {
            return Err(ValidationError::MissingRequired("compiler.program"));
        }
        Ok(())
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
        }
    }
}

fn default_program() -> String {
    "latexmk".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-pdf".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_config_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.program, "latexmk");
        assert_eq!(config.args, vec!["-pdf"]);
        assert!(config.working_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_program() {
        let config = CompilerConfig {
            program: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("compiler.program"))
        );
    }
}
