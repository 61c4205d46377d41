//! Application settings and paths.
//!
//! Settings live in an XDG-compliant config directory and hold the defaults
//! a search starts from. Command-line flags override them.

use crate::error::{ConfigError, ConfigResult};
use crate::finder::FindOptions;
use crate::scanner::{DEFAULT_CONCURRENCY, DEFAULT_HOST, DEFAULT_TIMEOUT};
use crate::types::{ExcludeSet, PortRange};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/freeport)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the platform configuration directory.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("dev", "freeport", "freeport")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Defaults applied to every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host to bind probes on.
    pub host: String,
    /// First port of the default range.
    pub start_port: u16,
    /// Last port of the default range.
    pub end_port: u16,
    /// Probes in flight per window.
    pub concurrency: usize,
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Validators applied when none are given on the command line.
    pub validators: Vec<String>,
    /// Ports always skipped, e.g. "5432,8000-8100".
    pub exclude: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            start_port: PortRange::DEFAULT_START,
            end_port: PortRange::DEFAULT_END,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            validators: Vec::new(),
            exclude: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults
    /// when there is no settings file or no configuration directory.
    pub fn load() -> ConfigResult<Self> {
        let Ok(paths) = Paths::new() else {
            return Ok(Self::default());
        };
        let file = paths.settings_file();
        if !file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Check that every field describes a usable search.
    pub fn validate(&self) -> ConfigResult<()> {
        self.range()?;
        self.exclude_set()?;
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn range(&self) -> ConfigResult<PortRange> {
        Ok(PortRange::from_bounds(self.start_port, self.end_port)?)
    }

    pub fn exclude_set(&self) -> ConfigResult<ExcludeSet> {
        Ok(self.exclude.parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build search options from these settings.
    pub fn to_options(&self) -> ConfigResult<FindOptions> {
        Ok(FindOptions::new(self.range()?)
            .with_host(self.host.clone())
            .with_exclude(self.exclude_set()?)
            .with_validators(self.validators.iter().cloned())
            .with_concurrency(self.concurrency)
            .with_timeout(self.timeout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.start_port, 3000);
        assert_eq!(settings.end_port, 65535);
        assert_eq!(settings.concurrency, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"start_port": 8000, "validators": ["well-known"]}}"#).unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.start_port, 8000);
        assert_eq!(settings.end_port, 65535);
        assert_eq!(settings.validators, vec!["well-known"]);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"start_port": 9000, "end_port": 8000}}"#).unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            exclude: "5432,8000-8010".to_string(),
            concurrency: 25,
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_to_options() {
        let settings = Settings {
            host: "127.0.0.1".to_string(),
            exclude: "4000".to_string(),
            timeout_ms: 250,
            ..Settings::default()
        };

        let options = settings.to_options().unwrap();
        assert_eq!(options.host, "127.0.0.1");
        assert_eq!(options.exclude.len(), 1);
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.range, PortRange::default());
    }
}
