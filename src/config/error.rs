//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bridge host '{0}'")]
    InvalidHost(String),

    #[error("Bridge host must be a loopback address, got {0}")]
    HostNotLoopback(String),

    #[error("Unsupported bridge scheme '{0}' (the bridge serves plain ws only)")]
    UnsupportedScheme(String),

    #[error("Outbound channel capacity must be greater than zero")]
    InvalidCapacity,

    #[error("Mapper timeout must be between 1 and 60000 milliseconds")]
    InvalidMapperTimeout,

    #[error("Invalid file extension '{0}' (give it without the leading dot)")]
    InvalidExtension(String),
}
