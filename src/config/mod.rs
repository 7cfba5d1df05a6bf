//! Configuration management for the export and import tools
//!
//! Configuration is layered (highest to lowest precedence):
//! 1. Command-line arguments
//! 2. Environment variables (bound to the same arguments)
//! 3. Configuration file (TOML)
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::store::firestore::DEFAULT_DATABASE_ID;

/// User-facing name of the primary database.
pub const DEFAULT_DATABASE_NAME: &str = "default";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Import configuration
    #[serde(default)]
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Console output configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Maximum documents sampled per collection
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Directory receiving the exported files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Documents fetched to estimate a collection's size
    #[serde(default = "default_count_cap")]
    pub count_cap: usize,
}

/// Import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory holding the collection files
    #[serde(default = "default_import_dir")]
    pub import_dir: PathBuf,

    /// Target database name; `default` means the primary database
    #[serde(default = "default_database_name")]
    pub database_name: String,
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

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored status markers
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show a progress bar while exporting
    #[serde(default = "default_progress")]
    pub progress: bool,
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
fn default_sample_limit() -> usize {
    5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("firestore_export")
}

fn default_count_cap() -> usize {
    100
}

fn default_import_dir() -> PathBuf {
    PathBuf::from("firestore_import")
}

fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

fn default_color_output() -> bool {
    true
}

fn default_progress() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sample_limit: default_sample_limit(),
            output_dir: default_output_dir(),
            count_cap: default_count_cap(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            import_dir: default_import_dir(),
            database_name: default_database_name(),
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

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            progress: default_progress(),
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults
    ///
    /// An explicitly given path must exist. Without one, the default path is
    /// used if present.
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()).into());
                }
                Self::parse_file(path)?
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::parse_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Default configuration file path: `<config dir>/firestore-sampler/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("firestore-sampler").join("config.toml"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.export.sample_limit == 0 {
            return Err(invalid("sample_limit", "0"));
        }
        if self.export.count_cap == 0 {
            return Err(invalid("count_cap", "0"));
        }
        if self.import.database_name.trim().is_empty() {
            return Err(invalid("database_name", ""));
        }
        Ok(())
    }
}

/// Map a user-facing database name to the id used in resource paths.
pub fn database_id(name: &str) -> String {
    match name {
        DEFAULT_DATABASE_NAME | DEFAULT_DATABASE_ID => DEFAULT_DATABASE_ID.to_string(),
        other => other.to_string(),
    }
}

/// Whether a `DRY_RUN`-style flag value means "on".
pub fn is_truthy(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn invalid(field: &str, value: &str) -> crate::error::SamplerError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
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
