//! Configuration management for airline.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::format::TimestampFormat;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "airline";

/// Environment variable prefix.
const ENV_PREFIX: &str = "AIRLINE_";

/// Timestamp format used in sinks and reports unless configured otherwise.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AIRLINE_`, sections split on `__`)
/// 2. TOML config file at `~/.config/airline/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flight source and sink locations.
    pub files: FilesConfig,
    /// Session behaviour.
    pub session: SessionConfig,
}

/// File locations.
///
/// Relative file names are resolved against `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Base directory for data files.
    /// Defaults to `~/.local/share/airline`
    pub data_dir: Option<PathBuf>,
    /// Flight source, read once at startup.
    pub flights: PathBuf,
    /// Append-only booking file.
    pub bookings: PathBuf,
    /// Append-only cancellation file.
    pub cancellations: PathBuf,
    /// Report file, overwritten on each report.
    pub report: PathBuf,
}

/// Session-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// `strftime` format for timestamps written to sinks and reports.
    pub timestamp_format: String,
    /// Heading of the generated report.
    pub report_title: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Will be resolved to default at runtime
            flights: PathBuf::from("flights.txt"),
            bookings: PathBuf::from("bookings.txt"),
            cancellations: PathBuf::from("cancellations.txt"),
            report: PathBuf::from("report.txt"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            report_title: crate::report::DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.session.report_title.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "report_title must not be empty".to_string(),
            });
        }

        self.timestamp_format()?;

        let paths = [
            ("flights", self.flights_path()),
            ("bookings", self.bookings_path()),
            ("cancellations", self.cancellations_path()),
            ("report", self.report_path()),
        ];
        let mut seen = HashSet::new();
        for (name, path) in &paths {
            if !seen.insert(path) {
                return Err(Error::ConfigValidation {
                    message: format!("{name} path {} is used by another file", path.display()),
                });
            }
        }

        Ok(())
    }

    /// Parse the configured timestamp format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestampFormat`] if the pattern is unusable.
    pub fn timestamp_format(&self) -> Result<TimestampFormat> {
        TimestampFormat::parse(self.session.timestamp_format.as_str())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.files
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Resolved flight source path.
    #[must_use]
    pub fn flights_path(&self) -> PathBuf {
        self.resolve(&self.files.flights)
    }

    /// Resolved booking sink path.
    #[must_use]
    pub fn bookings_path(&self) -> PathBuf {
        self.resolve(&self.files.bookings)
    }

    /// Resolved cancellation sink path.
    #[must_use]
    pub fn cancellations_path(&self) -> PathBuf {
        self.resolve(&self.files.cancellations)
    }

    /// Resolved report sink path.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.resolve(&self.files.report)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir().join(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "airline_config_{name}_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.files.data_dir.is_none());
        assert_eq!(config.files.flights, PathBuf::from("flights.txt"));
        assert_eq!(config.session.timestamp_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.session.report_title, "AIRLINE DAILY REPORT");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = Config::default();
        config.session.report_title = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("report_title"));
    }

    #[test]
    fn test_validate_bad_timestamp_format() {
        let mut config = Config::default();
        config.session.timestamp_format = "%Y-%Q".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timestamp_format"));
    }

    #[test]
    fn test_validate_timestamp_format_with_separator() {
        let mut config = Config::default();
        config.session.timestamp_format = "%d %b, %Y".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidTimestampFormat { .. }));
    }

    #[test]
    fn test_validate_timestamp_format_with_newline() {
        let mut config = Config::default();
        config.session.timestamp_format = "%Y-%m-%d%n%H:%M".to_string();

        assert!(config.validate().is_err());
        assert!(config.timestamp_format().is_err());
    }

    #[test]
    fn test_validate_colliding_paths() {
        let mut config = Config::default();
        config.files.cancellations = PathBuf::from("bookings.txt");

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cancellations"));
    }

    #[test]
    fn test_validate_colliding_absolute_and_relative() {
        let mut config = Config::default();
        config.files.data_dir = Some(PathBuf::from("/srv/airline"));
        config.files.report = PathBuf::from("/srv/airline/flights.txt");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paths_resolve_against_data_dir() {
        let mut config = Config::default();
        config.files.data_dir = Some(PathBuf::from("/srv/airline"));
        config.files.report = PathBuf::from("/tmp/daily.txt");

        assert_eq!(config.flights_path(), PathBuf::from("/srv/airline/flights.txt"));
        assert_eq!(
            config.cancellations_path(),
            PathBuf::from("/srv/airline/cancellations.txt")
        );
        assert_eq!(config.report_path(), PathBuf::from("/tmp/daily.txt"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("airline"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("airline"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_toml_file() {
        let path = temp_config(
            "load",
            "[files]\ndata_dir = \"/srv/airline\"\nflights = \"inventory.csv\"\n\n[session]\nreport_title = \"OPS\"\n",
        );

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.flights_path(), PathBuf::from("/srv/airline/inventory.csv"));
        assert_eq!(config.bookings_path(), PathBuf::from("/srv/airline/bookings.txt"));
        assert_eq!(config.session.report_title, "OPS");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_toml_file() {
        let path = temp_config("invalid", "[session]\ntimestamp_format = \"%Q\"\n");

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::InvalidTimestampFormat { .. })));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("timestamp_format"));
        assert!(json.contains("cancellations"));
    }
}
