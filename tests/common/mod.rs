//! Common test utilities for the snip CLI.
//!
//! - `init_test_logging`: route tracing output through the test harness
//! - `TestData`: a temporary data directory with helpers for reading what
//!   the storage layer wrote
//! - `snip`: a command for the compiled binary pointed at a `TestData`
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Temporary data directory removed when dropped.
pub struct TestData {
    pub dir: TempDir,
}

impl TestData {
    /// Create the directory with an empty `config.toml` in it.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(dir.path().join("config.toml"), "").expect("Failed to write config");
        Self { dir }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.path().join("state.json")
    }

    #[must_use]
    pub fn bundle_path(&self, language: &str) -> PathBuf {
        self.path()
            .join("snippets")
            .join(format!("{language}.code-snippets"))
    }

    /// Parse a JSON file written under the data directory.
    #[must_use]
    pub fn read_json(&self, path: &Path) -> Value {
        let contents = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", path.display()))
    }

    /// Write a bundle file by hand, as a user editing it would.
    pub fn write_bundle(&self, language: &str, contents: &str) {
        let path = self.bundle_path(language);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

impl Default for TestData {
    fn default() -> Self {
        Self::new()
    }
}

/// The `snip` binary with an isolated data directory and no ambient config.
#[must_use]
pub fn snip(data: &TestData) -> Command {
    let mut cmd = Command::cargo_bin("snip").expect("snip binary not built");
    cmd.env("SNIP_DATA_DIR", data.path())
        .env("SNIP_CONFIG", data.config_path())
        .env_remove("SNIP_MODE")
        .env_remove("SNIP_FORMAT")
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1");
    cmd
}
