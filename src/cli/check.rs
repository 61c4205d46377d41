//! Check subcommand implementation.

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliResult;
use crate::output;
use crate::scanner;
use crate::types::Port;
use clap::Parser;
use std::time::Duration;

/// Check whether a single port can be bound.
///
/// Exits with status 0 when the port is free and 1 when it is not.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Port to check
    #[arg(value_name = "PORT")]
    pub port: Port,

    /// Host to bind on [default: 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Probe timeout in milliseconds [default: 1000]
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

impl CheckCommand {
    /// Execute the check command, returning whether the port is free.
    pub async fn execute(&self, settings: &Settings, quiet: bool) -> CliResult<bool> {
        let host = self.host.as_deref().unwrap_or(&settings.host);
        let timeout = self
            .timeout
            .map(Duration::from_millis)
            .unwrap_or_else(|| settings.timeout());

        let available = scanner::probe(self.port, host, timeout).await;
        output::print_check(self.port, host, available, self.output, quiet)?;
        Ok(available)
    }
}
