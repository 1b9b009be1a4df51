//! Database configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration (SQLite file)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Optional directory for the database file
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Database file name
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Resolves the database file location.
    ///
    /// A configured `data_dir` is created when missing. If that fails the
    /// file lands in the working directory instead.
    pub fn resolve_path(&self) -> PathBuf {
        let dir = match self.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => Path::new(dir),
            _ => return PathBuf::from(&self.file_name),
        };

        match std::fs::create_dir_all(dir) {
            Ok(()) => dir.join(&self.file_name),
            Err(e) => {
                tracing::error!(
                    data_dir = %dir.display(),
                    error = %e,
                    "Failed to create data directory, using local database file"
                );
                PathBuf::from(&self.file_name)
            }
        }
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__FILE_NAME"));
        }
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("acquire_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: default_file_name(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

fn default_file_name() -> String {
    "bot.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    10
}
