//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use qrand_core::MAX_DIMENSIONALITY;

/// Default configuration file, read only when present.
pub const DEFAULT_CONFIG_FILE: &str = "qrand.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Dimensionality outside `1..=1000`.
    #[error("Invalid dimension: {0}. Must be between 1 and 1000")]
    InvalidDimension(usize),

    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}. Must be one of: table, csv, json")]
    InvalidFormat(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable holds an unparsable value.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for sampled points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Dimensionality of sampled points
    pub dimension: usize,
    /// Scrambling seed; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Default output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            dimension: 2,
            seed: None,
            log_level: LogLevel::Warn,
            format: OutputFormat::Table,
        }
    }
}

impl CliConfig {
    /// Overrides fields whose environment variable is set.
    ///
    /// `lookup` maps a variable name to its value, so tests can supply their
    /// own environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dimension) = lookup("QRAND_DIMENSION") {
            self.dimension = dimension
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("QRAND_DIMENSION={}", dimension)))?;
        }
        if let Some(seed) = lookup("QRAND_SEED") {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|_| ConfigError::EnvError(format!("QRAND_SEED={}", seed)))?,
            );
        }
        if let Some(level) = lookup("QRAND_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(level.trim())?;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension == 0 || self.dimension > MAX_DIMENSIONALITY {
            return Err(ConfigError::InvalidDimension(self.dimension));
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(dimension) = cli.dimension {
            self.dimension = dimension;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        Ok(())
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Dimension override
    pub dimension: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Output format override
    pub format: Option<String>,
    /// Forces debug logging
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) if path.exists() => CliConfig::from_file(path)?,
        Some(path) if path.as_os_str() != DEFAULT_CONFIG_FILE => {
            return Err(ConfigError::FileError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        _ => {
            debug!("No configuration file, using defaults");
            CliConfig::default()
        }
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
