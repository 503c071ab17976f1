//! Configuration for the snippet tool.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults (registry mode, platform data directory)
//! 2. An optional TOML file (`~/.config/snip/config.toml` or `--config`)
//! 3. Command-line flags and their environment variables
//!
//! ```toml
//! mode = "store"
//! data_dir = "~/snippets"
//! default_language = "rust"
//! ```

pub mod path;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SnipError};
use crate::persist;

pub use path::{default_config_path, default_data_dir, home_dir, resolve_path};

/// File name of the registry's key-value state.
pub const STATE_FILE: &str = "state.json";

/// Directory (under the data directory) holding language bundles.
pub const SNIPPETS_DIR: &str = "snippets";

/// Which storage strategy handles intake and completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One global mapping persisted in the key-value state file
    #[default]
    Registry,
    /// One bundle file per language, re-read on every lookup
    Store,
}

/// Contents of the TOML config file; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub mode: Option<Mode>,
    pub data_dir: Option<PathBuf>,
    pub default_language: Option<String>,
}

impl ConfigFile {
    /// Parse config file contents.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SnipError::ConfigParse(e.to_string()))
    }
}

/// Values supplied on the command line, taking precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mode: Option<Mode>,
    pub data_dir: Option<PathBuf>,
    pub default_language: Option<String>,
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub mode: Mode,
    pub data_dir: PathBuf,
    pub default_language: Option<String>,
    /// Config file that contributed settings, if any.
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load the config file (explicit path or default location) and apply
    /// `overrides`.
    ///
    /// An explicit path must exist; a missing default file is ignored.
    pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let (file, source) = match explicit {
            Some(path) => {
                let contents =
                    persist::read_optional(path)?.ok_or_else(|| SnipError::ConfigNotFound {
                        path: path.display().to_string(),
                    })?;
                (ConfigFile::parse(&contents)?, Some(path.to_path_buf()))
            }
            None => match default_config_path() {
                Some(path) => match persist::read_optional(&path)? {
                    Some(contents) => (ConfigFile::parse(&contents)?, Some(path)),
                    None => (ConfigFile::default(), None),
                },
                None => (ConfigFile::default(), None),
            },
        };

        let config = Self::resolve(file, source, overrides)?;
        info!(
            mode = ?config.mode,
            data_dir = %config.data_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Merge a parsed file with overrides and defaults.
    ///
    /// A relative `data_dir` from the file is resolved against the file's
    /// directory.
    pub fn resolve(file: ConfigFile, source: Option<PathBuf>, overrides: Overrides) -> Result<Self> {
        let base_dir = source
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let data_dir = match (overrides.data_dir, file.data_dir) {
            (Some(dir), _) => resolve_path(&dir, Path::new("."))?,
            (None, Some(dir)) => resolve_path(&dir, &base_dir)?,
            (None, None) => default_data_dir()?,
        };
        debug!(data_dir = %data_dir.display(), "Resolved data directory");

        Ok(Self {
            mode: overrides.mode.or(file.mode).unwrap_or_default(),
            data_dir,
            default_language: overrides
                .default_language
                .or(file.default_language)
                .filter(|l| !l.trim().is_empty()),
            source,
        })
    }

    /// Path of the registry's key-value state file.
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    /// Directory holding per-language bundles.
    pub fn snippets_dir(&self) -> PathBuf {
        self.data_dir.join(SNIPPETS_DIR)
    }
}
