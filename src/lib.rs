//! # freeport - Find Free TCP Ports
//!
//! freeport finds TCP ports that are free on a host by binding a listener
//! to each candidate and releasing it straight away.
//!
//! ## Features
//!
//! - **Two Strategies**: A sequential walk that can find blocks of adjacent
//!   ports, and a windowed parallel scan with bounded concurrency
//! - **Exclusions**: Skip ports regardless of whether they are free
//! - **Validators**: Named, composable filters such as `privileged` and
//!   `well-known`, plus custom ones registered at runtime
//! - **Typed Failures**: A short result becomes an error that reports what
//!   was requested and what was found
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use freeport::{FindOptions, PortFinder, PortRange, ValidatorRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), freeport::FindError> {
//!     let registry = ValidatorRegistry::new();
//!     let options = FindOptions::new(PortRange::from_bounds(8000, 9000)?)
//!         .with_validators(["well-known"])
//!         .with_count(3)
//!         .consecutive();
//!
//!     let found = PortFinder::new(&registry).find(&options).await?;
//!     println!("{:?}", found.ports);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, ranges and exclusion sets
//! - [`scanner`] - The bind probe and both scan strategies
//! - [`validators`] - Named predicates and their composition
//! - [`finder`] - Input checking, strategy selection and exhaustion errors
//! - [`config`] - Persistent default settings
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;
pub mod validators;

// Re-export commonly used types
pub use error::{CliError, ConfigError, FindError, FindResult};
pub use finder::{FindOptions, FoundPorts, PortFinder};
pub use scanner::{scan_parallel, scan_sequential, Probe, Strategy, TcpProbe};
pub use types::{ExcludeSet, Port, PortError, PortRange};
pub use validators::{Predicate, ValidatorRegistry};

/// Check whether `port` can be bound on `host`, with the default timeout.
pub async fn is_port_available(port: Port, host: &str) -> bool {
    scanner::probe(port, host, scanner::DEFAULT_TIMEOUT).await
}
