//! Error types for snippet operations.

use thiserror::Error;

/// Primary error type for snippet operations.
#[derive(Error, Debug)]
pub enum SnipError {
    // Intake errors
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Invalid intake message: {0}")]
    InvalidMessage(String),

    #[error("No snippet '{shortcut}' in {scope}")]
    SnippetNotFound { shortcut: String, scope: String },

    // Storage errors
    #[error("Snippet bundle {path} is corrupt: {reason}")]
    CorruptBundle { path: String, reason: String },

    #[error("Snippet registry snapshot is corrupt: {reason}")]
    CorruptSnapshot { reason: String },

    #[error("Failed to save snippets to {path}: {reason}")]
    SaveFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SnipError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidMessage(_)
                | Self::SnippetNotFound { .. }
                | Self::CorruptBundle { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Validation { .. } => Some("Provide a non-empty shortcut and code"),
            Self::InvalidMessage(_) => Some(
                r#"Send {"command": "saveSnippet", "shortcut": "...", "code": "..."}"#,
            ),
            Self::SnippetNotFound { .. } => Some("Run: snip list"),
            Self::CorruptBundle { .. } => {
                Some("Fix or delete the bundle file; it was left untouched")
            }
            Self::SaveFailed { .. } => Some("Check permissions on the data directory"),
            Self::ConfigNotFound { .. } => Some("Omit --config to use built-in defaults"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using SnipError.
pub type Result<T> = std::result::Result<T, SnipError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| SnipError::Other(format!("{}: {e}", f().into())))
    }
}
