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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid admin id '{0}'")]
    InvalidAdminId(String),

    #[error("Invalid language code '{0}'")]
    InvalidLanguage(String),

    #[error("Language '{0}' must be listed as essential")]
    LanguageNotEssential(String),

    #[error("Invalid timeout for {0}: must be greater than zero")]
    InvalidTimeout(&'static str),

    #[error("Pool max_connections must be at least 1")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Unknown log format '{0}' (expected 'pretty' or 'json')")]
    InvalidLogFormat(String),
}
