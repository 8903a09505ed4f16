//! Position mapper (SyncTeX) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the mapper timeout
const MAX_TIMEOUT_MS: u64 = 60_000;

/// Position mapper configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapperConfig {
    /// Executable to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before `edit -o <operand>`
    #[serde(default)]
    pub prefix_args: Vec<String>,

    /// Time allowed for a single invocation in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl MapperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate mapper configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.program.trim().is_empty() {
            return Err(ValidationError::MissingRequired("mapper.program"));
        }
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ValidationError::InvalidMapperTimeout);
        }
        Ok(())
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            prefix_args: Vec::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_program() -> String {
    "synctex".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_config_defaults() {
        let config = MapperConfig::default();
        assert_eq!(config.program, "synctex");
        assert!(config.prefix_args.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_program() {
        let config = MapperConfig {
            program: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("mapper.program"))
        );
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let config = MapperConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MapperConfig {
            timeout_ms: 120_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
