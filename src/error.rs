//! Error types for freeport.
//!
//! Uses `thiserror` for ergonomic error definitions. There is no variant for
//! socket failures: a port that cannot be bound is reported as unavailable.

use crate::types::{PortError, PortRange};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for port finding operations.
#[derive(Error, Debug)]
pub enum FindError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error("invalid count: {0} (must be at least 1)")]
    InvalidCount(usize),

    #[error("invalid concurrency: {0} (must be at least 1)")]
    InvalidConcurrency(usize),

    #[error("unknown validator: '{0}'")]
    UnknownValidator(String),

    #[error("no available port in range {range} on {host}")]
    NoAvailablePort { range: PortRange, host: String },

    #[error(
        "insufficient ports: requested {requested}{}, found {} in range {range} on {host}",
        consecutive_label(.consecutive),
        .found.len()
    )]
    InsufficientPorts {
        requested: usize,
        found: Vec<crate::types::Port>,
        range: PortRange,
        host: String,
        consecutive: bool,
    },
}

fn consecutive_label(consecutive: &bool) -> &'static str {
    if *consecutive {
        " consecutive"
    } else {
        ""
    }
}

impl FindError {
    /// Whether retrying with a wider range or fewer ports could succeed.
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::NoAvailablePort { .. } | Self::InsufficientPorts { .. }
        )
    }
}

/// Result type alias for port finding operations.
pub type FindResult<T> = Result<T, FindError>;

/// Errors loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

impl From<PortError> for ConfigError {
    fn from(e: PortError) -> Self {
        Self::Invalid(e.to_string())
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for the command-line binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Find(#[from] FindError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Exhaustion exits 1 like a negative `check`; bad input exits 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Find(e) if e.is_exhaustion() => 1,
            Self::Io(_) => 1,
            _ => 2,
        }
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;

    #[test]
    fn test_insufficient_ports_message() {
        let err = FindError::InsufficientPorts {
            requested: 5,
            found: vec![Port::new(8001).unwrap(), Port::new(8004).unwrap()],
            range: PortRange::from_bounds(8000, 8010).unwrap(),
            host: "127.0.0.1".to_string(),
            consecutive: false,
        };
        assert_eq!(
            err.to_string(),
            "insufficient ports: requested 5, found 2 in range 8000-8010 on 127.0.0.1"
        );
        assert!(err.is_exhaustion());
    }

    #[test]
    fn test_consecutive_message() {
        let err = FindError::InsufficientPorts {
            requested: 3,
            found: Vec::new(),
            range: PortRange::from_bounds(8000, 8010).unwrap(),
            host: "0.0.0.0".to_string(),
            consecutive: true,
        };
        assert!(err.to_string().starts_with("insufficient ports: requested 3 consecutive, found 0"));
    }

    #[test]
    fn test_exit_codes() {
        let unknown: CliError = FindError::UnknownValidator("nope".to_string()).into();
        assert_eq!(unknown.exit_code(), 2);

        let none: CliError = FindError::NoAvailablePort {
            range: PortRange::default(),
            host: "0.0.0.0".to_string(),
        }
        .into();
        assert_eq!(none.exit_code(), 1);
    }
}
