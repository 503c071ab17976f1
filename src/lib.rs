//! snip library - shortcut-to-code snippets served as editor completions.
//!
//! This library exposes the core functionality of the `snip` CLI for use in
//! tests and editor integrations.
//!
//! # Modules
//!
//! - `registry`: Global shortcut mapping persisted as a key-value snapshot
//! - `store`: File-backed snippet bundles, one per language
//! - `backend`: Trait shared by both storage strategies
//! - `intake`: Add-snippet message handling
//! - `snippet`: Shared records, validation, and completion entries
//! - `config`: Configuration file and path handling
//! - `error`: Error types with user-recoverable hints
#![forbid(unsafe_code)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod persist;
pub mod registry;
pub mod snippet;
pub mod store;
