//! Configuration management for mongosnap
//!
//! This module handles loading, parsing, and managing configuration from:
//! - Configuration files (TOML format)
//! - Command-line arguments (applied by the `cli` module)
//! - Default values
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! Every parameter of the export (credential path, database, collection,
//! output path) has a documented default, so invoking the binary with no
//! flags performs a complete export.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Export parameters
    #[serde(default)]
    pub export: ExportConfig,

    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Export parameters
///
/// All fields default to the values the tool shipped with, so a bare
/// invocation exports the default collection with the key file from the
/// working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Path to the service-account key file (default: `./serviceAccountKey.json`)
    #[serde(default = "default_credential_path")]
    pub credential_path: PathBuf,

    /// Database holding the collection (default: `app`)
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection to export (default: `quizResults`)
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Output file path, overwritten on every run (default: `./collection_data.json`)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server selection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Application name reported to the server
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_credential_path() -> PathBuf {
    PathBuf::from("./serviceAccountKey.json")
}

fn default_database() -> String {
    "app".to_string()
}

fn default_collection() -> String {
    "quizResults".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./collection_data.json")
}

fn default_timeout() -> u64 {
    30
}

fn default_app_name() -> String {
    "mongosnap".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            credential_path: default_credential_path(),
            database: default_database(),
            collection: default_collection(),
            output_path: default_output_path(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            app_name: default_app_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with proper precedence.
    ///
    /// An explicitly provided path must exist; the default path is used
    /// only if present, otherwise built-in defaults apply.
    ///
    /// # Arguments
    /// * `path` - Explicit config file path from the command line, if any
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded or default configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mongosnap")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.export.database.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.database".to_string(),
                value: self.export.database.clone(),
            }
            .into());
        }

        if self.export.collection.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.collection".to_string(),
                value: self.export.collection.clone(),
            }
            .into());
        }

        if self.connection.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connection.timeout".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Get server selection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.export.credential_path,
            PathBuf::from("./serviceAccountKey.json")
        );
        assert_eq!(config.export.database, "app");
        assert_eq!(config.export.collection, "quizResults");
        assert_eq!(
            config.export.output_path,
            PathBuf::from("./collection_data.json")
        );
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_connection_timeout() {
        let config = Config::default();
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_file_partial_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [export]
            collection = "examResults"

            [logging]
            level = "debug"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.export.collection, "examResults");
        // Unset fields keep their defaults
        assert_eq!(config.export.database, "app");
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("./no_such_config.toml").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExportError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not [valid toml").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExportError::Config(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_collection() {
        let mut config = Config::default();
        config.export.collection = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
