//! Structured logging for the snippet CLI.
//!
//! Logs always go to stderr so stdout stays clean for completion entries
//! and JSON replies.

use std::io::{self, IsTerminal};

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// JSON lines, one object per event
    Json,
    /// Colored multi-field output for an interactive terminal
    Pretty,
    /// Plain single-line output for pipes and files
    Compact,
}

impl LogStyle {
    /// Pick a style from robot mode and whether stderr is a terminal.
    pub const fn detect(robot_mode: bool, stderr_is_tty: bool) -> Self {
        if robot_mode {
            Self::Json
        } else if stderr_is_tty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

/// Filter directive used when `RUST_LOG` is unset.
///
/// The default is `warn` so that ordinary commands print only their result;
/// each `-v` raises the level one step.
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "snip=error";
    }
    match verbose {
        0 => "snip=warn",
        1 => "snip=info",
        2 => "snip=debug",
        _ => "snip=trace",
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the verbosity flags (e.g. `snip::store=trace`).
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let base = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    match LogStyle::detect(robot_mode, io::stderr().is_terminal()) {
        LogStyle::Json => registry.with(base.json().with_target(true)).init(),
        LogStyle::Pretty => registry.with(base).init(),
        LogStyle::Compact => registry.with(base.with_ansi(false).compact()).init(),
    }
}
