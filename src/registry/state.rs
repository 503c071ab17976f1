//! Durable key-value state backing the snippet registry.
//!
//! Mirrors a host editor's per-extension global state: values are JSON,
//! addressed by a string key, and each update replaces one key's value.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, SnipError};
use crate::persist;

/// Key-value storage the registry persists its snapshot into.
pub trait StateStore {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    fn update(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-process state, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    values: BTreeMap<String, Value>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryState {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// State kept as a single JSON object file, rewritten whole on every update.
#[derive(Debug, Clone)]
pub struct FileState {
    path: PathBuf,
}

impl FileState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>> {
        let contents = match persist::read_optional(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Ok(BTreeMap::new()),
            Err(SnipError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                return Err(SnipError::CorruptSnapshot {
                    reason: format!("{}: {e}", self.path.display()),
                });
            }
            Err(e) => return Err(e),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| SnipError::CorruptSnapshot {
            reason: format!("{}: {e}", self.path.display()),
        })
    }
}

impl StateStore for FileState {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);

        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| SnipError::Other(format!("Failed to serialize state: {e}")))?;
        persist::write_atomic(&self.path, &json)?;
        debug!(key, "State updated");
        Ok(())
    }
}
