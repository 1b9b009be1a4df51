//! Phrase catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::foundation::LanguageCode;

/// Language and phrase-file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Language used when a user has not chosen one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Last resort language for phrase lookups
    #[serde(default = "baseline_language")]
    pub baseline_language: String,

    /// Directory holding `<code>.json` phrase files
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Comma-separated languages whose files must load at startup
    #[serde(default = "default_essential")]
    pub essential: String,
}

impl LocaleConfig {
    pub fn default_language(&self) -> Result<LanguageCode, ValidationError> {
        parse_language(&self.default_language)
    }

    pub fn baseline_language(&self) -> Result<LanguageCode, ValidationError> {
        parse_language(&self.baseline_language)
    }

    /// Essential languages, de-duplicated in listed order.
    pub fn essential_languages(&self) -> Result<Vec<LanguageCode>, ValidationError> {
        let mut languages: Vec<LanguageCode> = Vec::new();
        for raw in self.essential.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let code = parse_language(raw)?;
            if !languages.contains(&code) {
                languages.push(code);
            }
        }
        Ok(languages)
    }

    pub fn directory(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }

    /// Validate locale configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.trim().is_empty() {
            return Err(ValidationError::MissingRequired("LOCALE__DIRECTORY"));
        }
        let essential = self.essential_languages()?;
        if essential.is_empty() {
            return Err(ValidationError::MissingRequired("LOCALE__ESSENTIAL"));
        }
        for code in [self.default_language()?, self.baseline_language()?] {
            if !essential.contains(&code) {
                return Err(ValidationError::LanguageNotEssential(code.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            baseline_language: baseline_language(),
            directory: default_directory(),
            essential: default_essential(),
        }
    }
}

fn parse_language(raw: &str) -> Result<LanguageCode, ValidationError> {
    LanguageCode::new(raw).map_err(|_| ValidationError::InvalidLanguage(raw.to_string()))
}

fn default_language() -> String {
    "lt".to_string()
}

fn baseline_language() -> String {
    "en".to_string()
}

fn default_directory() -> String {
    "locales".to_string()
}

fn default_essential() -> String {
    "en,lt".to_string()
}
