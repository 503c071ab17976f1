//! Integration tests for the registry's state-file persistence.

use serde_json::json;

use snip::error::SnipError;
use snip::registry::{FileState, Registry, SNAPSHOT_KEY, StateStore};

use crate::common::{TestData, init_test_logging};

fn open(data: &TestData) -> Registry<FileState> {
    Registry::open(FileState::new(data.state_path())).unwrap()
}

// ===== Round Trip Tests =====

#[test]
fn test_save_then_list_round_trip() {
    init_test_logging();
    let data = TestData::new();
    let mut registry = open(&data);

    let body = "for (let i = 0; i < n; i++) {\n  $1\n}";
    registry.save("fori", body).unwrap();

    let listed = registry.list();
    assert_eq!(listed, vec![("fori".to_string(), body.to_string())]);

    let entry = &registry.completions()[0];
    assert_eq!(entry.label, "fori");
    assert_eq!(entry.insert_text, body);
    assert_eq!(entry.documentation, body);
}

#[test]
fn test_snapshot_survives_restart() {
    let data = TestData::new();
    {
        let mut registry = open(&data);
        registry.save("a", "alpha").unwrap();
        registry.save("b", "beta").unwrap();
    }

    let reopened = open(&data);
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.get("b"), Some("beta"));
}

#[test]
fn test_snapshot_file_format() {
    let data = TestData::new();
    let mut registry = open(&data);
    registry.save("hello", "console.log('hi')").unwrap();

    let written = data.read_json(&data.state_path());
    assert_eq!(written, json!({ "snippets": [["hello", "console.log('hi')"]] }));
}

// ===== Overwrite and Validation Tests =====

#[test]
fn test_overwrite_leaves_one_entry() {
    let data = TestData::new();
    let mut registry = open(&data);
    registry.save("x", "A").unwrap();
    registry.save("x", "B").unwrap();

    let reopened = open(&data);
    assert_eq!(reopened.list(), vec![("x".to_string(), "B".to_string())]);
}

#[test]
fn test_empty_body_rejected_snapshot_unchanged() {
    let data = TestData::new();
    let mut registry = open(&data);
    registry.save("keep", "me").unwrap();
    let before = std::fs::read_to_string(data.state_path()).unwrap();

    let result = registry.save("foo", "");
    assert!(matches!(result, Err(SnipError::Validation { .. })));
    assert!(registry.get("foo").is_none());
    assert_eq!(std::fs::read_to_string(data.state_path()).unwrap(), before);
}

#[test]
fn test_empty_storage_lists_nothing() {
    let data = TestData::new();
    let registry = open(&data);
    assert!(registry.is_empty());
    assert!(registry.completions().is_empty());
    assert!(!data.state_path().exists());
}

// ===== Load Tests =====

#[test]
fn test_load_same_snapshot_twice() {
    let data = TestData::new();
    let mut state = FileState::new(data.state_path());
    state
        .update(SNAPSHOT_KEY, json!([["a", "1"], ["b", "2"]]))
        .unwrap();

    let mut registry = Registry::open(FileState::new(data.state_path())).unwrap();
    let once = registry.list();
    registry.load_persisted().unwrap();
    assert_eq!(registry.list(), once);
}

#[test]
fn test_corrupt_state_file() {
    let data = TestData::new();
    std::fs::write(data.state_path(), "{\"snippets\": 42}").unwrap();

    let result = Registry::open(FileState::new(data.state_path()));
    assert!(matches!(result, Err(SnipError::CorruptSnapshot { .. })));
}

#[test]
fn test_save_failure_keeps_memory_change() {
    let data = TestData::new();
    // A directory where the state file belongs makes persisting fail.
    std::fs::create_dir_all(data.state_path()).unwrap();

    let mut registry = Registry::new(FileState::new(data.state_path()));
    let result = registry.save("a", "1");
    assert!(result.is_err());
    assert_eq!(registry.get("a"), Some("1"));
}

#[test]
fn test_unwritable_state_reports_save_failed() {
    let data = TestData::new();
    let blocker = data.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut registry = Registry::open(FileState::new(blocker.join("state.json"))).unwrap();
    let result = registry.save("a", "1");
    assert!(matches!(result, Err(SnipError::SaveFailed { .. })));
    assert_eq!(registry.list(), vec![("a".to_string(), "1".to_string())]);
}
