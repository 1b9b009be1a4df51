//! Phrase resolution with tiered language fallback.

use std::sync::Arc;

use super::{interpolate, InterpolationError, MessageArg, PhraseCatalog, LANGUAGE_NAME_KEY};
use crate::domain::foundation::LanguageCode;

/// Resolves `(language, key)` pairs to localized text.
///
/// Lookup order: requested language, system default language, baseline
/// language, then the caller-supplied default or the key itself.
#[derive(Debug, Clone)]
pub struct PhraseResolver {
    catalog: Arc<PhraseCatalog>,
    default_language: LanguageCode,
    baseline_language: LanguageCode,
}

impl PhraseResolver {
    pub fn new(catalog: PhraseCatalog, default_language: LanguageCode, baseline_language: LanguageCode) -> Self {
        Self {
            catalog: Arc::new(catalog),
            default_language,
            baseline_language,
        }
    }

    pub fn default_language(&self) -> &LanguageCode {
        &self.default_language
    }

    pub fn baseline_language(&self) -> &LanguageCode {
        &self.baseline_language
    }

    /// Returns true if a phrase table is loaded for the language.
    pub fn supports(&self, language: &LanguageCode) -> bool {
        self.catalog.contains_language(language)
    }

    /// Finds the raw template for a key following the fallback chain.
    pub fn template(&self, language: &LanguageCode, key: &str) -> Option<&str> {
        [language, &self.default_language, &self.baseline_language]
            .into_iter()
            .find_map(|lang| self.catalog.lookup(lang, key))
    }

    /// Resolves and interpolates a phrase, falling back to the key.
    pub fn resolve(&self, language: &LanguageCode, key: &str, args: &[MessageArg]) -> String {
        self.resolve_or(language, key, args, key)
    }

    /// Resolves and interpolates a phrase, falling back to `default`.
    ///
    /// The caller default is interpolated as well. If an argument is missing
    /// the uninterpolated template is returned; a malformed template yields
    /// the key.
    pub fn resolve_or(&self, language: &LanguageCode, key: &str, args: &[MessageArg], default: &str) -> String {
        let template = match self.template(language, key) {
            Some(t) => t,
            None => {
                tracing::debug!(language = %language, key, "Phrase missing in all fallback languages");
                default
            }
        };
        match interpolate(template, args) {
            Ok(text) => text,
            Err(e @ InterpolationError::MissingArgument(_)) => {
                tracing::warn!(language = %language, key, error = %e, "Phrase argument missing");
                template.to_string()
            }
            Err(e) => {
                tracing::warn!(language = %language, key, error = %e, "Malformed phrase template");
                key.to_string()
            }
        }
    }

    /// Lists loaded languages with their display labels.
    pub fn languages(&self) -> Vec<(LanguageCode, String)> {
        self.catalog
            .languages()
            .map(|code| {
                let label = self
                    .catalog
                    .lookup(code, LANGUAGE_NAME_KEY)
                    .map(str::to_string)
                    .unwrap_or_else(|| code.as_str().to_uppercase());
                (code.clone(), label)
            })
            .collect()
    }
}
