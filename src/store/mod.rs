//! File-backed snippet store with one bundle per language.
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/
//! └── snippets/
//!     ├── js.code-snippets
//!     ├── python.code-snippets
//!     └── rust.code-snippets
//! ```
//!
//! Lookups read the bundle from disk on every call so edits made outside
//! the running process are picked up immediately. Saves are a full
//! read-modify-write of one bundle without locking; concurrent writers to
//! the same bundle lose updates.

pub mod bundle;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SnipError};
use crate::persist;
use crate::snippet::{self, CompletionEntry};

pub use bundle::{BUNDLE_EXTENSION, Bundle, BundleSnippet, SnippetBody, SnippetPrefix};

/// Per-language snippet bundles under a storage root.
#[derive(Debug, Clone)]
pub struct LanguageStore {
    root: PathBuf,
}

impl LanguageStore {
    /// Store bundles under `root`; the directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the bundle for `language`.
    pub fn bundle_path(&self, language: &str) -> Result<PathBuf> {
        snippet::validate_language(language)?;
        Ok(self.root.join(format!("{language}.{BUNDLE_EXTENSION}")))
    }

    /// Read and parse the bundle for `language`; `None` if it does not exist.
    pub fn read_bundle(&self, language: &str) -> Result<Option<Bundle>> {
        let path = self.bundle_path(language)?;
        let corrupt = |reason: String| SnipError::CorruptBundle {
            path: path.display().to_string(),
            reason,
        };
        let contents = match persist::read_optional(&path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Ok(None),
            Err(SnipError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                return Err(corrupt(e.to_string()));
            }
            Err(e) => return Err(e),
        };
        bundle::parse(&contents)
            .map(Some)
            .map_err(|e| corrupt(e.to_string()))
    }

    /// Add or overwrite `shortcut` in `language`'s bundle and rewrite it.
    ///
    /// A corrupt bundle is left untouched and reported as
    /// [`SnipError::CorruptBundle`].
    #[instrument(skip(self, code))]
    pub fn save(&self, language: &str, shortcut: &str, code: &str) -> Result<PathBuf> {
        snippet::validate_language(language)?;
        snippet::validate_shortcut(shortcut)?;
        snippet::validate_code(code)?;

        let mut bundle = self.read_bundle(language)?.unwrap_or_default();
        let record = BundleSnippet::new(language, shortcut, code);
        if bundle.insert(shortcut.to_string(), record).is_some() {
            debug!("Overwriting existing snippet");
        }

        let path = self.write_bundle(language, &bundle)?;
        info!(path = %path.display(), count = bundle.len(), "Snippet saved");
        Ok(path)
    }

    /// Completion entries for every snippet in `language`'s bundle.
    ///
    /// A language without a bundle has no entries.
    #[instrument(skip(self))]
    pub fn list_for_language(&self, language: &str) -> Result<Vec<CompletionEntry>> {
        let Some(bundle) = self.read_bundle(language)? else {
            debug!("No bundle for language");
            return Ok(Vec::new());
        };
        Ok(bundle
            .iter()
            .map(|(key, record)| record.to_completion(key, language))
            .collect())
    }

    /// Delete `shortcut` from `language`'s bundle and rewrite it.
    #[instrument(skip(self))]
    pub fn remove(&self, language: &str, shortcut: &str) -> Result<()> {
        let mut bundle = self.read_bundle(language)?.unwrap_or_default();
        if bundle.remove(shortcut).is_none() {
            return Err(SnipError::SnippetNotFound {
                shortcut: shortcut.to_string(),
                scope: format!("the {language} bundle"),
            });
        }
        self.write_bundle(language, &bundle)?;
        Ok(())
    }

    /// Languages that currently have a bundle, sorted.
    pub fn languages(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SnipError::Io(e)),
        };

        let mut languages = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(BUNDLE_EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if !stem.is_empty() => languages.push(stem.to_string()),
                _ => warn!(path = %path.display(), "Skipping bundle with unusable name"),
            }
        }
        languages.sort();
        Ok(languages)
    }

    fn write_bundle(&self, language: &str, bundle: &Bundle) -> Result<PathBuf> {
        let path = self.bundle_path(language)?;
        let json = bundle::render(bundle)
            .map_err(|e| SnipError::Other(format!("Failed to serialize bundle: {e}")))?;
        persist::write_atomic(&path, &json)?;
        Ok(path)
    }
}
