//! Configuration management for attrsh
//!
//! This module handles loading, parsing, and managing configuration from:
//! - Configuration files (TOML format)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Schema snapshot configuration
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Completion behaviour
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where attribute descriptions come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// JSON snapshot of description responses
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Resource address selected at startup
    #[serde(default = "default_address")]
    pub address: String,

    /// Seconds a loaded description stays cached
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
}

/// Completion behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Only offer attributes that are not read-only
    #[serde(default = "default_writable_only")]
    pub writable_only: bool,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Enable attribute path highlighting
    #[serde(default = "default_highlighting")]
    pub highlighting: bool,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
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
fn default_address() -> String {
    "/".to_string()
}

fn default_cache_ttl() -> u64 {
    30
}

fn default_writable_only() -> bool {
    false
}

fn default_color() -> bool {
    true
}

fn default_highlighting() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".attrsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            file: None,
            address: default_address(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            writable_only: default_writable_only(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            highlighting: default_highlighting(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
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
    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `~/.attrsh/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".attrsh")
            .join("config.toml")
    }

    /// Load configuration from a file
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error.
    ///
    /// # Arguments
    /// * `path` - Explicit configuration file, or `None` for the default location
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Serialize configuration to TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Generic(e.to_string()).into())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.schema.address.parse::<crate::schema::ResourceAddress>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "schema.address".to_string(),
                value: self.schema.address.clone(),
            }
            .into());
        }

        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Get schema cache lifetime as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.schema.cache_ttl)
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
    use crate::error::AttrshError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema.address, "/");
        assert!(config.schema.file.is_none());
        assert!(!config.completion.writable_only);
        assert!(config.display.color);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [schema]
            file = "/tmp/model.json"
            address = "/subsystem=web"

            [completion]
            writable_only = true
            "#,
        )
        .unwrap();

        assert_eq!(config.schema.file, Some(PathBuf::from("/tmp/model.json")));
        assert_eq!(config.schema.address, "/subsystem=web");
        assert_eq!(config.schema.cache_ttl, 30);
        assert!(config.completion.writable_only);
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[schema\n").unwrap_err();
        assert!(matches!(err, AttrshError::Config(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let mut config = Config::default();
        config.schema.address = "subsystem=web".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.completion.writable_only = true;
        config.logging.level = LogLevel::Debug;

        let text = config.to_toml().unwrap();
        let parsed = Config::from_toml(&text).unwrap();
        assert!(parsed.completion.writable_only);
        assert_eq!(parsed.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load_from_file(Some(Path::new("/nonexistent/attrsh.toml"))).unwrap_err();
        assert!(matches!(err, AttrshError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_cache_ttl() {
        assert_eq!(Config::default().cache_ttl(), Duration::from_secs(30));
    }
}
