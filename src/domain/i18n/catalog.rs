//! Phrase catalogs keyed by language.

use std::collections::{BTreeMap, HashMap};

use crate::domain::foundation::LanguageCode;

/// Key holding a catalog's own language name, used to label language choices.
pub const LANGUAGE_NAME_KEY: &str = "language_name";

/// Loaded phrase tables, one per language.
///
/// Languages iterate in code order so language pickers are stable.
#[derive(Debug, Clone, Default)]
pub struct PhraseCatalog {
    tables: BTreeMap<LanguageCode, HashMap<String, String>>,
}

impl PhraseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the table for a language.
    pub fn insert(&mut self, language: LanguageCode, table: HashMap<String, String>) {
        self.tables.insert(language, table);
    }

    /// Builder form of [`insert`](Self::insert) for static tables.
    pub fn with_table<'a>(
        mut self,
        language: LanguageCode,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let table = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.insert(language, table);
        self
    }

    pub fn contains_language(&self, language: &LanguageCode) -> bool {
        self.tables.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.tables.keys()
    }

    /// Looks up a key in exactly one language.
    pub fn lookup(&self, language: &LanguageCode, key: &str) -> Option<&str> {
        self.tables.get(language)?.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
