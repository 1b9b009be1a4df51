//! Session engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Bounds applied to per-intent handling
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Longest a single handler may run before the user gets the generic error
    #[serde(default = "default_handler_timeout")]
    pub handler_timeout_secs: u64,
}

impl EngineConfig {
    /// Get handler timeout as Duration
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.handler_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("handler_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handler_timeout_secs: default_handler_timeout(),
        }
    }
}

fn default_handler_timeout() -> u64 {
    15
}
