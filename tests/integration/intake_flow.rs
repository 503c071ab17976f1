//! Integration tests for intake messages dispatched to the configured backend.

use snip::backend::{Backend, SnippetBackend};
use snip::config::{Config, ConfigFile, Mode, Overrides};
use snip::error::SnipError;
use snip::intake::{self, IntakeMessage};

use crate::common::TestData;

fn backend(data: &TestData, mode: Mode, default_language: Option<&str>) -> Backend {
    let file = ConfigFile {
        default_language: default_language.map(str::to_string),
        ..ConfigFile::default()
    };
    let overrides = Overrides {
        mode: Some(mode),
        data_dir: Some(data.path().to_path_buf()),
        default_language: None,
    };
    Backend::open(&Config::resolve(file, None, overrides).unwrap()).unwrap()
}

#[test]
fn test_registry_intake_then_complete() {
    let data = TestData::new();
    let mut backend = backend(&data, Mode::Registry, None);

    let message = IntakeMessage::parse(
        r#"{"command":"saveSnippet","shortcut":"hello","code":"console.log('hi')","language":"js"}"#,
    )
    .unwrap();
    let reply = intake::handle(&mut backend, &message).unwrap();
    assert_eq!(reply, "Snippet saved with shortcut: hello");

    // Global scope: visible from any document language.
    for language in [None, Some("rust"), Some("js")] {
        let entries = backend.completions(language).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "hello");
    }
}

#[test]
fn test_store_intake_then_complete() {
    let data = TestData::new();
    let mut backend = backend(&data, Mode::Store, None);

    let message = IntakeMessage::parse(
        r#"{"command":"saveSnippet","shortcut":"hello","code":"console.log('hi')","language":"js"}"#,
    )
    .unwrap();
    let reply = intake::handle(&mut backend, &message).unwrap();
    assert_eq!(reply, "Snippet saved with shortcut: hello for js");

    assert_eq!(backend.completions(Some("js")).unwrap().len(), 1);
    assert!(backend.completions(Some("rust")).unwrap().is_empty());
}

#[test]
fn test_store_intake_uses_default_language() {
    let data = TestData::new();
    let mut backend = backend(&data, Mode::Store, Some("python"));

    let message =
        IntakeMessage::parse(r#"{"command":"saveSnippet","shortcut":"pr","code":"print()"}"#)
            .unwrap();
    let reply = intake::handle(&mut backend, &message).unwrap();
    assert_eq!(reply, "Snippet saved with shortcut: pr for python");
    assert!(data.bundle_path("python").is_file());
}

#[test]
fn test_empty_code_rejected_before_persisting() {
    let data = TestData::new();
    let mut backend = backend(&data, Mode::Store, None);

    let message = IntakeMessage::parse(
        r#"{"command":"saveSnippet","shortcut":"x","code":"   ","language":"js"}"#,
    )
    .unwrap();
    let result = intake::handle(&mut backend, &message);
    assert!(matches!(result, Err(SnipError::Validation { field: "code", .. })));
    assert!(!data.bundle_path("js").exists());
}

#[test]
fn test_missing_fields_are_invalid_messages() {
    let result = IntakeMessage::parse(r#"{"command":"saveSnippet","shortcut":"x"}"#);
    assert!(matches!(result, Err(SnipError::InvalidMessage(_))));
}
