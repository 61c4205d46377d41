//! Plain text output formatting.
//!
//! On a terminal the results are styled; when stdout is piped, or with
//! `--quiet`, only bare port numbers are printed, one per line.

use crate::finder::{FindOptions, FoundPorts};
use crate::output::CheckReport;
use crate::services;
use crate::validators::{ValidatorRegistry, BUILTINS};
use console::{style, Term};
use std::io::{self, Write};

/// Print found ports.
pub fn print_found(found: &FoundPorts, quiet: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if quiet || !Term::stdout().is_term() {
        for port in &found.ports {
            writeln!(out, "{}", port)?;
        }
        return Ok(());
    }

    writeln!(
        out,
        "{} {} on {} ({}, {}ms)",
        style("Found").green().bold(),
        pluralize(found.ports.len(), "free port"),
        style(&found.host).white().bold(),
        found.strategy,
        found.duration_ms
    )?;
    for port in &found.ports {
        writeln!(out, "  {}", style(port).green().bold())?;
    }
    Ok(())
}

/// Print the result of checking a single port.
pub fn print_check(report: &CheckReport<'_>, quiet: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if quiet {
        return writeln!(out, "{}", report.available);
    }

    let state = if report.available {
        style("free").green().bold()
    } else {
        style("in use").red().bold()
    };
    write!(out, "Port {} on {} is {}", report.port, report.host, state)?;
    if let Some(service) = services::service_name(report.port) {
        write!(out, " {}", style(format!("(well-known: {})", service)).dim())?;
    }
    writeln!(out)
}

/// Print the search parameters before probing starts.
pub fn print_search_header(options: &FindOptions) {
    let what = if options.consecutive {
        format!("{} consecutive", pluralize(options.count, "port"))
    } else {
        pluralize(options.count, "port")
    };

    eprintln!(
        "{} {} in {} on {}",
        style("Searching").cyan(),
        style(what).white().bold(),
        options.range,
        options.host
    );
    if !options.exclude.is_empty() {
        eprintln!(
            "{} Excluding {}",
            style("•").dim(),
            pluralize(options.exclude.len(), "port")
        );
    }
    if !options.validators.is_empty() {
        eprintln!(
            "{} Validators: {}",
            style("•").dim(),
            style(options.validators.join(", ")).yellow()
        );
    }
}

/// Print every validator the registry can resolve.
pub fn print_validators(registry: &ValidatorRegistry) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for name in registry.names() {
        let description = BUILTINS
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.description)
            .unwrap_or("custom validator");
        writeln!(out, "  {:<12} {}", style(&name).bold(), description)?;
    }
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "port"), "1 port");
        assert_eq!(pluralize(3, "free port"), "3 free ports");
        assert_eq!(pluralize(0, "port"), "0 ports");
    }
}
