//! Application configuration module
//!
//! Configuration is read from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `ORDER_DESK` prefix and nested
//! values use a double underscore as separator.
//!
//! # Example
//!
//! ```no_run
//! use order_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Database file: {}", config.database.resolve_path().display());
//! ```

mod bot;
mod database;
mod engine;
mod error;
mod locale;

pub use bot::BotConfig;
pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use locale::LocaleConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bot credential and administrators
    pub bot: BotConfig,

    /// Phrase files and language fallbacks
    #[serde(default)]
    pub locale: LocaleConfig,

    /// SQLite storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Per-intent handling bounds
    #[serde(default)]
    pub engine: EngineConfig,

    /// Tracing filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `ORDER_DESK__BOT__TOKEN=...` -> `bot.token = ...`
    /// - `ORDER_DESK__DATABASE__DATA_DIR=/data` -> `database.data_dir = /data`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ORDER_DESK")
                    .separator("__"),
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
        self.bot.validate()?;
        self.locale.validate()?;
        self.database.validate()?;
        self.engine.validate()?;
        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            return Err(ValidationError::InvalidLogFormat(self.log_format.clone()));
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
