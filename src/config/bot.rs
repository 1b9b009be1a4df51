//! Bot credential and administrator configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::foundation::UserId;

/// Chat platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot API credential
    pub token: Secret<String>,

    /// Comma-separated numeric ids of administrators
    #[serde(default)]
    pub admin_ids: String,

    /// Bot API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Long-poll timeout in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    /// Parses the administrator id list.
    ///
    /// Blank entries between commas are skipped; anything else that is not
    /// an integer fails the whole list.
    pub fn admins(&self) -> Result<Vec<UserId>, ValidationError> {
        let admins = self
            .admin_ids
            .split(',')
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<UserId>()
                    .map_err(|_| ValidationError::InvalidAdminId(raw.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if admins.is_empty() {
            return Err(ValidationError::MissingRequired("BOT__ADMIN_IDS"));
        }
        Ok(admins)
    }

    /// Get poll timeout as Duration
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Validate bot configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOT__TOKEN"));
        }
        if self.api_url.is_empty() {
            return Err(ValidationError::MissingRequired("BOT__API_URL"));
        }
        if self.poll_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("poll_timeout_secs"));
        }
        self.admins()?;
        Ok(())
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}
