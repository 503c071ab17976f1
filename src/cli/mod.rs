//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{Mode, Overrides};

/// snip - Save shortcut-to-code snippets and serve them as completions.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "snip", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for editor hosts/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "SNIP_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Storage strategy: one global registry or one bundle per language
    #[arg(long, short = 'm', global = true, env = "SNIP_MODE")]
    pub mode: Option<Mode>,

    /// Directory holding the registry state and language bundles
    #[arg(long, global = true, env = "SNIP_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.config/snip/config.toml when present)
    #[arg(long, global = true, env = "SNIP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// Pretty JSON
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }

    /// Configuration values given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            mode: self.mode,
            data_dir: self.data_dir.clone(),
            default_language: None,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Snippets ===
    /// Save a snippet (reads code from stdin when neither CODE nor --file is given)
    Add(AddArgs),

    /// Handle a JSON intake message from the add-snippet form
    Intake(IntakeArgs),

    /// Print completion entries for a document
    Complete(CompleteArgs),

    /// List saved snippets
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Delete a snippet
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// List languages that have a snippet bundle
    Languages,

    // === Utilities ===
    /// Show the resolved configuration and storage paths
    Paths,

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Shortcut that triggers the snippet
    pub shortcut: String,

    /// Snippet code
    #[arg(conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the snippet code from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Language bundle to store the snippet in (store mode)
    #[arg(long, short = 'l')]
    pub language: Option<String>,
}

#[derive(Parser, Debug)]
pub struct IntakeArgs {
    /// JSON message (read from stdin when omitted)
    pub message: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CompleteArgs {
    /// Language identifier of the requesting document
    #[arg(long, short = 'l')]
    pub language: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Language bundle to list (store mode)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Show snippet bodies
    #[arg(long)]
    pub long: bool,
}

#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Shortcut to delete
    pub shortcut: String,

    /// Language bundle to delete from (store mode)
    #[arg(long, short = 'l')]
    pub language: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
