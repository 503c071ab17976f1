//! Shared snippet records, validation, and completion entries.
//!
//! Both storage strategies funnel their input through [`validate_shortcut`]
//! and [`validate_code`] and project their contents into [`CompletionEntry`]
//! values, so the intake and completion handlers never care which strategy
//! is active.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnipError};

/// Detail label attached to registry completions.
pub const REGISTRY_DETAIL: &str = "Code Snippet";

/// Kind reported for every completion entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionKind {
    #[default]
    Snippet,
}

/// A single autocomplete suggestion offered to the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntry {
    /// Text shown in the completion list; the shortcut.
    pub label: String,
    /// Text inserted when the entry is accepted.
    pub insert_text: String,
    /// Markdown preview of the snippet body.
    pub documentation: String,
    pub kind: CompletionKind,
    pub detail: String,
}

impl CompletionEntry {
    /// Entry for a registry snippet: the body is shown verbatim.
    pub fn from_registry(shortcut: &str, body: &str) -> Self {
        Self {
            label: shortcut.to_string(),
            insert_text: body.to_string(),
            documentation: body.to_string(),
            kind: CompletionKind::Snippet,
            detail: REGISTRY_DETAIL.to_string(),
        }
    }

    /// Entry for a bundle snippet: the body is wrapped in a code fence.
    pub fn from_bundle(label: &str, body: &str, detail: &str) -> Self {
        Self {
            label: label.to_string(),
            insert_text: body.to_string(),
            documentation: fenced(body),
            kind: CompletionKind::Snippet,
            detail: detail.to_string(),
        }
    }
}

/// Wrap a body in a markdown code fence for display.
pub fn fenced(body: &str) -> String {
    format!("```\n{body}\n```")
}

/// Description stored alongside every bundle snippet.
pub fn describe(language: &str) -> String {
    format!("Snippet for {language}")
}

/// Split a body into its stored lines, normalizing `\r\n` to `\n`.
///
/// Rejoining the result with [`join_lines`] reproduces the normalized body,
/// including a trailing newline (stored as a final empty line).
pub fn split_lines(body: &str) -> Vec<String> {
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Reassemble stored lines into a body.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Reject shortcuts that are empty after trimming.
pub fn validate_shortcut(shortcut: &str) -> Result<()> {
    if shortcut.trim().is_empty() {
        return Err(SnipError::validation("shortcut", "must not be empty"));
    }
    Ok(())
}

/// Reject code bodies that are empty after trimming.
pub fn validate_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(SnipError::validation("code", "must not be empty"));
    }
    Ok(())
}

/// Reject language identifiers that are empty or would escape the bundle root.
///
/// Any other string is accepted; there is no fixed set of known languages.
pub fn validate_language(language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(SnipError::validation("language", "must not be empty"));
    }
    if language.contains(['/', '\\', '\0']) || language == "." || language == ".." {
        return Err(SnipError::validation(
            "language",
            format!("'{language}' is not a plain identifier"),
        ));
    }
    Ok(())
}
