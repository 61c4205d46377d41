//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `freeport find` - Find free ports (the default when no subcommand is given)
//! - `freeport check <port>` - Check a single port
//! - `freeport validators` - List available validators

mod check;
mod find;

pub use check::CheckCommand;
pub use find::FindCommand;

use crate::config::Settings;
use crate::error::CliResult;
use crate::output;
use crate::validators::ValidatorRegistry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// freeport - find free TCP ports.
///
/// Probes ports by binding a listener and releasing it immediately. Ports
/// can be excluded, filtered by named validators, or required to form a
/// consecutive block.
#[derive(Parser, Debug)]
#[command(name = "freeport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find free TCP ports on a host", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH", env = "FREEPORT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find one or more free ports
    #[command(alias = "f")]
    Find(FindCommand),

    /// Check whether a single port is free
    #[command(alias = "c")]
    Check(CheckCommand),

    /// List available validators
    #[command(alias = "v")]
    Validators,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl Cli {
    /// Load settings from `--config`, or the default location.
    pub fn settings(&self) -> CliResult<Settings> {
        let settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };
        debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Run the selected command.
    ///
    /// Returns `false` when the command completed but the answer was
    /// negative, such as `check` on an occupied port.
    pub async fn run(self) -> CliResult<bool> {
        let settings = self.settings()?;
        let registry = ValidatorRegistry::new();

        match self.command {
            Some(Commands::Find(cmd)) => cmd.execute(&settings, &registry, self.quiet).await,
            Some(Commands::Check(cmd)) => cmd.execute(&settings, self.quiet).await,
            Some(Commands::Validators) => {
                output::print_validators(&registry)?;
                Ok(true)
            }
            None => {
                FindCommand::default()
                    .execute(&settings, &registry, self.quiet)
                    .await
            }
        }
    }
}
