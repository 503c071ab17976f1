//! On-disk format of a per-language snippet bundle.
//!
//! A bundle is a JSON object keyed by shortcut:
//!
//! ```json
//! {
//!   "hello": {
//!     "prefix": "hello",
//!     "body": ["console.log('hi')"],
//!     "description": "Snippet for js"
//!   }
//! }
//! ```
//!
//! Bundles may be edited by hand, so `prefix` and `body` given either as a
//! single string or as a list, and a missing `description`, are accepted.
//! Unknown fields survive rewrites.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::snippet::{self, CompletionEntry};

/// File extension of bundle files.
pub const BUNDLE_EXTENSION: &str = "code-snippets";

/// Every snippet for one language, keyed by shortcut.
pub type Bundle = BTreeMap<String, BundleSnippet>;

/// A snippet body as stored: normally a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetBody {
    Lines(Vec<String>),
    Text(String),
}

impl SnippetBody {
    /// The body as one string, lines joined with `\n`.
    pub fn text(&self) -> String {
        match self {
            Self::Lines(lines) => snippet::join_lines(lines),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Trigger text of a record: one prefix or several alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetPrefix {
    One(String),
    Many(Vec<String>),
}

impl Default for SnippetPrefix {
    fn default() -> Self {
        Self::One(String::new())
    }
}

impl SnippetPrefix {
    /// The first non-empty prefix, if any.
    pub fn first(&self) -> Option<&str> {
        let first = match self {
            Self::One(prefix) => Some(prefix.as_str()),
            Self::Many(prefixes) => prefixes.first().map(String::as_str),
        };
        first.filter(|p| !p.is_empty())
    }
}

/// One entry of a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSnippet {
    #[serde(default)]
    pub prefix: SnippetPrefix,
    pub body: SnippetBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BundleSnippet {
    /// Build the record written for `shortcut` in `language`'s bundle.
    pub fn new(language: &str, shortcut: &str, code: &str) -> Self {
        Self {
            prefix: SnippetPrefix::One(shortcut.to_string()),
            body: SnippetBody::Lines(snippet::split_lines(code)),
            description: Some(snippet::describe(language)),
            extra: Map::new(),
        }
    }

    /// Completion entry for this record stored under `key`.
    ///
    /// The label is always the shortcut `key`; a hand-edited `prefix` that
    /// differs from it does not change what the completion shows.
    pub fn to_completion(&self, key: &str, language: &str) -> CompletionEntry {
        let detail = self
            .description
            .clone()
            .unwrap_or_else(|| snippet::describe(language));
        CompletionEntry::from_bundle(key, &self.body.text(), &detail)
    }
}

/// Parse bundle contents; whitespace-only content is an empty bundle.
pub fn parse(contents: &str) -> serde_json::Result<Bundle> {
    if contents.trim().is_empty() {
        return Ok(Bundle::new());
    }
    serde_json::from_str(contents)
}

/// Serialize a bundle the way it is written to disk.
pub fn render(bundle: &Bundle) -> serde_json::Result<String> {
    serde_json::to_string_pretty(bundle)
}
