//! Language code value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const MAX_LEN: usize = 8;

/// Lowercase language tag identifying a phrase catalog (`en`, `lt`, `pt-br`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a LanguageCode, normalising to lowercase.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim().to_ascii_lowercase();
        if code.is_empty() {
            return Err(ValidationError::empty_field("language_code"));
        }
        if code.len() > MAX_LEN {
            return Err(ValidationError::invalid_format(
                "language_code",
                format!("'{}' is longer than {} characters", code, MAX_LEN),
            ));
        }
        if !code.chars().all(|c| c.is_ascii_lowercase() || c == '-') || code.starts_with('-') {
            return Err(ValidationError::invalid_format(
                "language_code",
                format!("'{}' is not a language tag", code),
            ));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
