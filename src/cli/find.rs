//! Find subcommand implementation.
//!
//! Handles `freeport find`, which is also what runs with no subcommand.

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliResult;
use crate::finder::{FindOptions, PortFinder};
use crate::output;
use crate::types::{ExcludeSet, PortRange};
use crate::validators::{self, ValidatorRegistry};
use clap::Parser;
use std::time::Duration;

/// Find one or more free ports.
#[derive(Parser, Debug, Default)]
pub struct FindCommand {
    /// First port to consider [default: 3000]
    #[arg(short, long, value_name = "PORT")]
    pub start: Option<u16>,

    /// Last port to consider [default: 65535]
    #[arg(short, long, value_name = "PORT")]
    pub end: Option<u16>,

    /// Host to bind on [default: 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Number of ports to find [default: 1]
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Require the ports to be adjacent
    #[arg(short = 'C', long)]
    pub consecutive: bool,

    /// Ports to skip (e.g., "8080", "5432,8000-8100"), added to configured exclusions
    #[arg(short = 'x', long, value_name = "PORTS")]
    pub exclude: Option<String>,

    /// Comma-separated validators applied in order (see `freeport validators`)
    #[arg(short = 'f', long, value_name = "NAMES")]
    pub validators: Option<String>,

    /// Maximum number of concurrent probes [default: 100]
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in milliseconds [default: 1000]
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

impl FindCommand {
    /// Merge command-line flags over the configured settings.
    pub fn options(&self, settings: &Settings) -> CliResult<FindOptions> {
        let mut options = settings.to_options()?;

        options.range = PortRange::from_bounds(
            self.start.unwrap_or(settings.start_port),
            self.end.unwrap_or(settings.end_port),
        )?;
        if let Some(host) = &self.host {
            options.host = host.clone();
        }
        if let Some(exclude) = &self.exclude {
            let extra: ExcludeSet = exclude.parse()?;
            options.exclude.extend(extra.to_sorted());
        }
        if let Some(names) = &self.validators {
            options.validators = validators::parse_names(names);
        }
        if let Some(count) = self.count {
            options.count = count;
        }
        if let Some(concurrency) = self.concurrency {
            options.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            options.timeout = Duration::from_millis(timeout);
        }
        options.consecutive = self.consecutive;

        Ok(options)
    }

    /// Execute the find command.
    pub async fn execute(
        &self,
        settings: &Settings,
        registry: &ValidatorRegistry,
        quiet: bool,
    ) -> CliResult<bool> {
        let options = self.options(settings)?;

        if !quiet && self.output == OutputFormat::Plain {
            output::print_search_header(&options);
        }

        let found = PortFinder::new(registry).find(&options).await?;
        output::print_found(&found, self.output, quiet)?;
        Ok(true)
    }
}
