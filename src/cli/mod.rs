//! Command-line interface for commit-check.
//!
//! Running `commit-check` with no subcommand runs the full check sequence.
//! The only subcommand is `completions`.

mod commands;

use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run every pre-commit check in order and stop at the first failure.
#[derive(Debug, Parser)]
#[command(
    name = "commit-check",
    author,
    version,
    about = "Run every pre-commit check in order and stop at the first failure",
    long_about = r#"
commit-check runs the repository's checks in a fixed order and stops at the
first one that fails. If it passes, the commit is safe.

Order:
  1. git diff --quiet        no unstaged changes
  2. nix run .#fmt           format
  3. git diff --quiet        formatting changed nothing
  4. nix run .#fmt-check     format check
  5. nix run .#lint          lint
  6. nix run .#check         type check
  7. nix run .#test          tests
  8. nix run .#build         build

Exit status is 0 when every check passes and 1 otherwise.
"#,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress diagnostic output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use color output.
    #[arg(
        long,
        global = true,
        default_value = "auto",
        env = "COMMIT_CHECK_COLOR"
    )]
    pub color: ColorChoice,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Always use color.
    Always,
    /// Auto-detect color support.
    #[default]
    Auto,
    /// Never use color.
    Never,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Runs the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    setup_color(cli.color);

    match cli.command {
        Some(Commands::Completions { shell }) => {
            commands::completions(shell)?;
            Ok(ExitCode::SUCCESS)
        },
        None => commands::check(),
    }
}

/// Returns the default log filter for the verbosity flags.
fn log_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Sets up logging based on verbosity flags.
fn setup_logging(verbose: bool, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up color output.
fn setup_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        },
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        },
        ColorChoice::Auto => {
            // Let console crate auto-detect
        },
    }
}
