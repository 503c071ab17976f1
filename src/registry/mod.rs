//! Global snippet registry.
//!
//! Holds every snippet in one language-agnostic mapping from shortcut to
//! body. The mapping is loaded once from a [`StateStore`] and written back in
//! full, as an ordered list of `[shortcut, body]` pairs, after every change.
//!
//! # Usage
//!
//! ```ignore
//! use snip::registry::{FileState, Registry};
//!
//! let mut registry = Registry::open(FileState::new("state.json"))?;
//! registry.save("log", "console.log($1)")?;
//! for (shortcut, body) in registry.list() {
//!     println!("{shortcut}: {body}");
//! }
//! ```

mod state;

use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SnipError};
use crate::snippet::{self, CompletionEntry};

pub use state::{FileState, MemoryState, StateStore};

/// State key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "snippets";

/// Shortcut-to-body mapping with whole-snapshot persistence.
#[derive(Debug)]
pub struct Registry<S> {
    snippets: IndexMap<String, String>,
    state: S,
}

impl<S: StateStore> Registry<S> {
    /// Create an empty registry over `state` without reading it.
    pub fn new(state: S) -> Self {
        Self {
            snippets: IndexMap::new(),
            state,
        }
    }

    /// Create a registry and load the persisted snapshot from `state`.
    #[instrument(skip_all)]
    pub fn open(state: S) -> Result<Self> {
        let mut registry = Self::new(state);
        let count = registry.load_persisted()?;
        info!(count, "Snippet registry loaded");
        Ok(registry)
    }

    /// Merge `pairs` into the mapping; later pairs win on duplicate shortcuts.
    pub fn load<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (shortcut, body) in pairs {
            self.snippets.insert(shortcut.into(), body.into());
        }
    }

    /// Load the snapshot stored in the backing state; returns the entry count.
    ///
    /// A missing snapshot is an empty registry.
    pub fn load_persisted(&mut self) -> Result<usize> {
        let Some(value) = self.state.get(SNAPSHOT_KEY)? else {
            debug!("No persisted snapshot");
            return Ok(self.snippets.len());
        };
        let pairs: Vec<(String, String)> =
            serde_json::from_value(value).map_err(|e| SnipError::CorruptSnapshot {
                reason: e.to_string(),
            })?;
        self.load(pairs);
        Ok(self.snippets.len())
    }

    /// Insert or overwrite a snippet, then persist the whole mapping.
    ///
    /// Nothing changes when either argument is blank. If persisting fails
    /// the in-memory mapping keeps the new snippet.
    #[instrument(skip_all, fields(shortcut = %shortcut))]
    pub fn save(&mut self, shortcut: &str, body: &str) -> Result<()> {
        snippet::validate_shortcut(shortcut)?;
        snippet::validate_code(body)?;

        if self
            .snippets
            .insert(shortcut.to_string(), body.to_string())
            .is_some()
        {
            debug!("Overwriting existing snippet");
        }
        self.persist()
    }

    /// Delete a snippet and persist the remaining mapping.
    #[instrument(skip(self))]
    pub fn remove(&mut self, shortcut: &str) -> Result<String> {
        let Some(body) = self.snippets.shift_remove(shortcut) else {
            return Err(SnipError::SnippetNotFound {
                shortcut: shortcut.to_string(),
                scope: "the registry".to_string(),
            });
        };
        self.persist()?;
        Ok(body)
    }

    /// Snapshot of all `(shortcut, body)` pairs in insertion order.
    pub fn list(&self) -> Vec<(String, String)> {
        self.snippets
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Completion entries for every snippet.
    pub fn completions(&self) -> Vec<CompletionEntry> {
        self.snippets
            .iter()
            .map(|(shortcut, body)| CompletionEntry::from_registry(shortcut, body))
            .collect()
    }

    pub fn get(&self, shortcut: &str) -> Option<&str> {
        self.snippets.get(shortcut).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn persist(&mut self) -> Result<()> {
        let value = serde_json::to_value(self.list())
            .map_err(|e| SnipError::Other(format!("Failed to serialize snapshot: {e}")))?;
        if let Err(e) = self.state.update(SNAPSHOT_KEY, value) {
            warn!(error = %e, "Registry changed in memory but was not persisted");
            return Err(e);
        }
        Ok(())
    }
}
