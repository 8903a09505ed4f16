//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PREVIEW_SYNC` prefix and nested values use double underscores as separators.
//!
//! Every value has a default, so an empty environment yields a working
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use preview_sync::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Bridge binds {}", config.bridge.bind_addr());
//! ```

mod bridge;
mod compiler;
mod error;
mod mapper;
mod preview;

pub use bridge::BridgeConfig;
pub use compiler::CompilerConfig;
pub use error::{ConfigError, ValidationError};
pub use mapper::MapperConfig;
pub use preview::PreviewConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Bridge server configuration (host, scheme, queue sizes)
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Position mapper configuration (SyncTeX command, timeout)
    #[serde(default)]
    pub mapper: MapperConfig,

    /// Preview document configuration (extensions, viewer, URI scheme)
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Compiler configuration
    #[serde(default)]
    pub compiler: CompilerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PREVIEW_SYNC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits list values on spaces
    ///
    /// # Environment Variable Format
    ///
    /// - `PREVIEW_SYNC__MAPPER__TIMEOUT_MS=2000` -> `mapper.timeout_ms = 2000`
    /// - `PREVIEW_SYNC__COMPILER__ARGS="-pdf -interaction=nonstopmode"` -> two args
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PREVIEW_SYNC")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("mapper.prefix_args")
                    .with_list_parse_key("compiler.args")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bridge.validate()?;
        self.mapper.validate()?;
        self.preview.validate()?;
        self.compiler.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("PREVIEW_SYNC__MAPPER__TIMEOUT_MS");
        env::remove_var("PREVIEW_SYNC__MAPPER__PROGRAM");
        env::remove_var("PREVIEW_SYNC__COMPILER__ARGS");
        env::remove_var("PREVIEW_SYNC__PREVIEW__ARTIFACT_EXTENSION");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.bridge.host, "127.0.0.1");
        assert_eq!(config.mapper.program, "synctex");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PREVIEW_SYNC__MAPPER__TIMEOUT_MS", "2000");
        env::set_var("PREVIEW_SYNC__MAPPER__PROGRAM", "/opt/texlive/bin/synctex");
        env::set_var("PREVIEW_SYNC__PREVIEW__ARTIFACT_EXTENSION", "dvi");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.mapper.timeout_ms, 2000);
        assert_eq!(config.mapper.program, "/opt/texlive/bin/synctex");
        assert_eq!(config.preview.artifact_extension, "dvi");
    }

    #[test]
    fn test_list_values_split_on_spaces() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PREVIEW_SYNC__COMPILER__ARGS", "-pdf -interaction=nonstopmode");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.compiler.args, vec!["-pdf", "-interaction=nonstopmode"]);
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.mapper.timeout_ms = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidMapperTimeout));
    }
}
