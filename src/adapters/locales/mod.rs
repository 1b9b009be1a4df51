//! File-based phrase catalog loader.
//!
//! Reads one `<language>.json` file per language from a directory. Each file
//! is a flat JSON object mapping phrase keys to template strings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::domain::foundation::LanguageCode;
use crate::domain::i18n::PhraseCatalog;

/// Errors that abort catalog loading.
#[derive(Debug, Error)]
pub enum PhraseLoadError {
    #[error("Cannot read phrase directory {path}: {reason}")]
    Directory { path: PathBuf, reason: String },

    #[error("Essential phrase file for '{language}' not found in {path}")]
    MissingEssential { language: LanguageCode, path: PathBuf },

    #[error("Essential phrase file {path} is invalid: {reason}")]
    InvalidEssential { path: PathBuf, reason: String },
}

/// Loads phrase tables from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FilePhraseLoader {
    directory: PathBuf,
}

impl FilePhraseLoader {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Loads every readable catalog.
    ///
    /// Broken optional files are logged and skipped. A missing or broken
    /// essential language aborts loading.
    pub async fn load(&self, essential: &[LanguageCode]) -> Result<PhraseCatalog, PhraseLoadError> {
        let mut entries = fs::read_dir(&self.directory).await.map_err(|e| PhraseLoadError::Directory {
            path: self.directory.clone(),
            reason: e.to_string(),
        })?;

        let mut catalog = PhraseCatalog::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(PhraseLoadError::Directory {
                        path: self.directory.clone(),
                        reason: e.to_string(),
                    })
                }
            };
            let path = entry.path();
            let Some(language) = language_of(&path) else {
                continue;
            };

            match read_table(&path).await {
                Ok(table) => {
                    tracing::info!(language = %language, phrases = table.len(), "Loaded phrase catalog");
                    catalog.insert(language, table);
                }
                Err(reason) if essential.contains(&language) => {
                    return Err(PhraseLoadError::InvalidEssential { path, reason });
                }
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "Skipping invalid phrase file");
                }
            }
        }

        for language in essential {
            if !catalog.contains_language(language) {
                return Err(PhraseLoadError::MissingEssential {
                    language: language.clone(),
                    path: self.directory.clone(),
                });
            }
        }

        Ok(catalog)
    }
}

/// Language code from a `<code>.json` file name.
fn language_of(path: &Path) -> Option<LanguageCode> {
    if path.extension()?.to_str()? != "json" {
        return None;
    }
    LanguageCode::new(path.file_stem()?.to_str()?).ok()
}

async fn read_table(path: &Path) -> Result<HashMap<String, String>, String> {
    let text = fs::read_to_string(path).await.map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}
