//! User module - chat participants known to the desk.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LanguageCode, UserId};

/// Identity details the chat platform reports for a sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    /// Platform handle without the leading `@`.
    pub handle: Option<String>,
}

impl UserProfile {
    pub fn new(id: UserId, display_name: impl Into<String>, handle: Option<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            handle,
        }
    }

    /// Display name, or `N/A` when the platform sent none.
    pub fn name_or_placeholder(&self) -> &str {
        if self.display_name.trim().is_empty() {
            "N/A"
        } else {
            &self.display_name
        }
    }

    /// Handle rendered as `@name`, or `N/A`.
    pub fn handle_label(&self) -> String {
        match self.handle.as_deref() {
            Some(h) if !h.is_empty() => format!("@{}", h),
            _ => "N/A".to_string(),
        }
    }
}

/// A stored user.
///
/// The admin flag mirrors process configuration and is refreshed on every
/// contact; the language is only changed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub handle: Option<String>,
    pub is_admin: bool,
    pub language: LanguageCode,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(self.id, self.display_name.clone(), self.handle.clone())
    }
}
