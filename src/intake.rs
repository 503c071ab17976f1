//! Add-snippet intake messages.
//!
//! The form posts a JSON message tagged by `command`:
//!
//! ```json
//! {"command": "saveSnippet", "shortcut": "log", "code": "console.log()", "language": "js"}
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::backend::{Saved, SnippetBackend};
use crate::error::{Result, SnipError};
use crate::snippet;

/// A message received from the add-snippet form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum IntakeMessage {
    SaveSnippet(SaveRequest),
}

/// Fields of a `saveSnippet` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub shortcut: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl IntakeMessage {
    /// Parse a JSON message.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SnipError::InvalidMessage(e.to_string()))
    }
}

/// Validate and persist a `saveSnippet` request; returns the confirmation
/// shown to the user.
#[instrument(skip_all, fields(shortcut = %request.shortcut))]
pub fn save_snippet(backend: &mut dyn SnippetBackend, request: &SaveRequest) -> Result<String> {
    snippet::validate_shortcut(&request.shortcut)?;
    snippet::validate_code(&request.code)?;

    let saved = backend.save(
        request.language.as_deref(),
        &request.shortcut,
        &request.code,
    )?;
    info!(language = ?saved.language, "Snippet accepted");
    Ok(confirmation(&saved))
}

/// Dispatch any intake message.
pub fn handle(backend: &mut dyn SnippetBackend, message: &IntakeMessage) -> Result<String> {
    match message {
        IntakeMessage::SaveSnippet(request) => save_snippet(backend, request),
    }
}

/// User-facing confirmation for a saved snippet.
pub fn confirmation(saved: &Saved) -> String {
    match &saved.language {
        Some(language) => format!(
            "Snippet saved with shortcut: {} for {language}",
            saved.shortcut
        ),
        None => format!("Snippet saved with shortcut: {}", saved.shortcut),
    }
}
