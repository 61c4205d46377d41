//! Output formatting module.
//!
//! Results go to stdout in plain text or JSON; headers and diagnostics go
//! to stderr so the port list can be captured by scripts.

mod json_format;
mod plain;

pub use json_format::print_json;
pub use plain::{print_error, print_search_header, print_validators};

use crate::cli::OutputFormat;
use crate::finder::FoundPorts;
use crate::types::Port;
use serde::Serialize;
use std::io;

/// Result of checking a single port.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport<'a> {
    pub port: Port,
    pub host: &'a str,
    pub available: bool,
}

/// Print the ports a search found.
pub fn print_found(found: &FoundPorts, format: OutputFormat, quiet: bool) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_found(found, quiet),
        OutputFormat::Json => print_json(found),
    }
}

/// Print the outcome of a single-port check.
pub fn print_check(
    port: Port,
    host: &str,
    available: bool,
    format: OutputFormat,
    quiet: bool,
) -> io::Result<()> {
    let report = CheckReport {
        port,
        host,
        available,
    };
    match format {
        OutputFormat::Plain => plain::print_check(&report, quiet),
        OutputFormat::Json => print_json(&report),
    }
}
