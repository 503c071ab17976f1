//! Integration tests for configuration loading.

use std::path::PathBuf;

use env_lock::lock_env;

use snip::config::{Config, Mode, Overrides};
use snip::error::SnipError;

use crate::common::TestData;

#[test]
fn test_explicit_config_file() {
    let data = TestData::new();
    std::fs::write(
        data.config_path(),
        "mode = \"store\"\ndata_dir = \"bundles\"\ndefault_language = \"rust\"\n",
    )
    .unwrap();

    let config = Config::load(Some(&data.config_path()), Overrides::default()).unwrap();
    assert_eq!(config.mode, Mode::Store);
    assert_eq!(config.data_dir, data.path().join("bundles"));
    assert_eq!(config.default_language.as_deref(), Some("rust"));
    assert_eq!(config.source, Some(data.config_path()));
}

#[test]
fn test_invalid_config_file() {
    let data = TestData::new();
    std::fs::write(data.config_path(), "mode = [").unwrap();

    let result = Config::load(Some(&data.config_path()), Overrides::default());
    assert!(matches!(result, Err(SnipError::ConfigParse(_))));
}

#[test]
fn test_empty_config_file_uses_defaults() {
    let data = TestData::new();
    let overrides = Overrides {
        data_dir: Some(PathBuf::from("/tmp/snip-test-data")),
        ..Overrides::default()
    };

    let config = Config::load(Some(&data.config_path()), overrides).unwrap();
    assert_eq!(config.mode, Mode::Registry);
    assert_eq!(config.data_dir, PathBuf::from("/tmp/snip-test-data"));
    assert!(config.default_language.is_none());
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location() {
    let data = TestData::new();
    let config_home = data.path().join("xdg");
    std::fs::create_dir_all(config_home.join("snip")).unwrap();
    std::fs::write(config_home.join("snip").join("config.toml"), "mode = \"store\"\n").unwrap();

    let _guard = lock_env([("XDG_CONFIG_HOME", Some(config_home.to_str().unwrap()))]);
    let config = Config::load(None, Overrides::default()).unwrap();
    assert_eq!(config.mode, Mode::Store);
    assert_eq!(
        config.source,
        Some(config_home.join("snip").join("config.toml"))
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_missing_default_config_is_fine() {
    let data = TestData::new();
    let config_home = data.path().join("empty");
    let _guard = lock_env([("XDG_CONFIG_HOME", Some(config_home.to_str().unwrap()))]);

    let config = Config::load(None, Overrides::default()).unwrap();
    assert_eq!(config.mode, Mode::Registry);
    assert!(config.source.is_none());
}
