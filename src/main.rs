//! snip - Save shortcut-to-code snippets and serve them as completions.
//!
//! Provides both human-friendly and machine-readable (robot mode) output.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal, Read};

use clap::Parser;
use console::style;
use serde::Serialize;

use snip::backend::{Backend, SnippetBackend};
use snip::cli::{self, Cli, Commands};
use snip::config::{Config, Mode};
use snip::error::{Result, ResultExt, SnipError};
use snip::intake::{self, IntakeMessage, SaveRequest};
use snip::logging;
use snip::store::LanguageStore;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Add(args)) => cmd_add(cli, args),
        Some(Commands::Intake(args)) => cmd_intake(cli, args),
        Some(Commands::Complete(args)) => cmd_complete(cli, args),
        Some(Commands::List(args)) => cmd_list(cli, args),
        Some(Commands::Remove(args)) => cmd_remove(cli, args),
        Some(Commands::Languages) => cmd_languages(cli),
        Some(Commands::Paths) => cmd_paths(cli),
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(cli, args),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(cli.config.as_deref(), cli.overrides())
}

fn open_backend(cli: &Cli) -> Result<Backend> {
    Backend::open(&load_config(cli)?)
}

// === Quick Start ===

fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "tool": "snip",
                "version": build_info::VERSION,
                "description": "Shortcut-to-code snippets served as editor completions",
                "save": "snip add <SHORTCUT> <CODE> [--language L]",
                "intake": r#"snip intake '{"command":"saveSnippet","shortcut":"..","code":".."}'"#,
                "complete": "snip complete [--language L] --robot",
                "modes": {
                    "registry": "one global mapping in state.json (default)",
                    "store": "one <language>.code-snippets bundle per language",
                },
            }),
        )
    } else {
        println!(
            "{} {} - snippet registry\n",
            style("snip").bold().cyan(),
            build_info::VERSION
        );
        println!("{}", style("QUICK START").bold().underlined());
        println!();
        println!("  {}  Save a snippet", style("snip add log 'console.log($1)'").green());
        println!("  {}  List snippets", style("snip list --long").green());
        println!("  {}  Completion entries", style("snip complete").green());
        println!("  {}  Delete a snippet", style("snip remove log").green());
        println!();
        println!("{}", style("PER-LANGUAGE BUNDLES").bold().underlined());
        println!();
        println!("  {}", style("snip --mode store add main 'fn main() {}' -l rust").cyan());
        println!("  {}", style("snip --mode store complete -l rust").cyan());
        println!();
        println!("Run {} for full help", style("snip --help").yellow());
        Ok(())
    }
}

// === Command Implementations ===

fn cmd_add(cli: &Cli, args: &cli::AddArgs) -> Result<()> {
    let code = match (&args.code, &args.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => read_stdin("code")?,
    };
    let request = SaveRequest {
        shortcut: args.shortcut.clone(),
        code,
        language: args.language.clone(),
    };

    let mut backend = open_backend(cli)?;
    let message = intake::save_snippet(&mut backend, &request)?;
    report_saved(cli, &request, &message)
}

fn cmd_intake(cli: &Cli, args: &cli::IntakeArgs) -> Result<()> {
    let raw = match &args.message {
        Some(message) => message.clone(),
        None => read_stdin("message")?,
    };
    let message = IntakeMessage::parse(&raw)?;

    let mut backend = open_backend(cli)?;
    let reply = intake::handle(&mut backend, &message)?;
    let IntakeMessage::SaveSnippet(request) = &message;
    report_saved(cli, request, &reply)
}

fn report_saved(cli: &Cli, request: &SaveRequest, message: &str) -> Result<()> {
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "ok": true,
                "shortcut": request.shortcut,
                "message": message,
            }),
        )
    } else {
        if !cli.quiet {
            println!("{}", style(message).green());
        }
        Ok(())
    }
}

fn cmd_complete(cli: &Cli, args: &cli::CompleteArgs) -> Result<()> {
    let backend = open_backend(cli)?;
    let entries = backend.completions(args.language.as_deref())?;

    if cli.use_json() {
        return output_json(cli, &entries);
    }
    for entry in &entries {
        println!("{}\t{}", entry.label, style(&entry.detail).dim());
    }
    Ok(())
}

fn cmd_list(cli: &Cli, args: &cli::ListArgs) -> Result<()> {
    let backend = open_backend(cli)?;
    let entries = backend.completions(args.language.as_deref())?;

    if cli.use_json() {
        let pairs: Vec<_> = entries
            .iter()
            .map(|e| ListedSnippet {
                shortcut: &e.label,
                body: &e.insert_text,
            })
            .collect();
        return output_json(cli, &pairs);
    }

    if entries.is_empty() {
        if !cli.quiet {
            println!("{}", style("No snippets saved yet").yellow());
        }
        return Ok(());
    }
    for entry in &entries {
        if args.long {
            println!("{}", style(&entry.label).green().bold());
            for line in entry.insert_text.lines() {
                println!("    {line}");
            }
        } else {
            println!("{}", entry.label);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ListedSnippet<'a> {
    shortcut: &'a str,
    body: &'a str,
}

fn cmd_remove(cli: &Cli, args: &cli::RemoveArgs) -> Result<()> {
    let mut backend = open_backend(cli)?;
    backend.remove(args.language.as_deref(), &args.shortcut)?;

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({ "shortcut": args.shortcut, "removed": true }),
        )
    } else {
        if !cli.quiet {
            println!("Snippet {} removed", args.shortcut);
        }
        Ok(())
    }
}

fn cmd_languages(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let languages = LanguageStore::new(config.snippets_dir()).languages()?;

    if cli.use_json() {
        return output_json(cli, &languages);
    }
    if languages.is_empty() && !cli.quiet {
        println!("{}", style("No language bundles yet").yellow());
    }
    for language in &languages {
        println!("{language}");
    }
    Ok(())
}

fn cmd_paths(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let state = config.state_path();
    let snippets = config.snippets_dir();

    if cli.use_json() {
        return output_json(
            cli,
            &serde_json::json!({
                "config": config,
                "state_file": state,
                "snippets_dir": snippets,
            }),
        );
    }

    let mode = match config.mode {
        Mode::Registry => "registry",
        Mode::Store => "store",
    };
    println!("{}: {mode}", style("Mode").bold());
    println!(
        "{}: {}",
        style("Config").bold(),
        config
            .source
            .as_ref()
            .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
    );
    println!("{}: {}", style("Data").bold(), config.data_dir.display());
    println!("{}: {}", style("State").bold(), state.display());
    println!("{}: {}", style("Bundles").bold(), snippets.display());
    if let Some(language) = &config.default_language {
        println!("{}: {language}", style("Default language").bold());
    }
    Ok(())
}

fn cmd_version(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        return output_json(
            cli,
            &serde_json::json!({
                "version": build_info::VERSION,
                "git_sha": build_info::git_sha(),
                "git_dirty": build_info::git_dirty() == "true",
                "build_timestamp": build_info::build_timestamp(),
                "rustc_version": build_info::rustc_semver(),
                "target": build_info::target(),
            }),
        );
    }

    println!("snip {}", build_info::VERSION);
    println!(
        "git: {}{}",
        build_info::git_sha(),
        if build_info::git_dirty() == "true" {
            " (dirty)"
        } else {
            ""
        }
    );
    println!("built: {}", build_info::build_timestamp());
    println!("rustc: {}", build_info::rustc_semver());
    println!("target: {}", build_info::target());
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(_cli: &Cli, args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "snip", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

fn read_stdin(what: &'static str) -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(SnipError::validation(
            what,
            "nothing given; pass it as an argument or pipe it on stdin",
        ));
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}

fn output_json<T: Serialize + ?Sized>(cli: &Cli, data: &T) -> Result<()> {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    }
    .with_context(|| "Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn output_error(cli: &Cli, error: &SnipError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{json:#}");
    } else {
        eprintln!("{}: {}", style("Error").red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", style("Hint").yellow(), suggestion);
        }
    }
}
