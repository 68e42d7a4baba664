//! Configuration management for chanlog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;

/// How channel output is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare message per line
    #[default]
    Message,
    /// Timestamp, level, message and fields
    Text,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Show debug messages on the error channel
    #[serde(default)]
    pub debug: bool,

    /// Suppress info output; errors are still shown
    #[serde(default)]
    pub quiet: bool,

    /// Rendering of both channels: "message" (default) or "text"
    #[serde(default)]
    pub format: OutputFormat,

    /// Prefix lines with a timestamp (text format only)
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Color lines by level (text format only)
    #[serde(default)]
    pub color: bool,

    /// Append admitted entries to this file; `~` is expanded
    #[serde(default)]
    pub log_file: Option<String>,

    /// Lowest level written to the log file (default: debug)
    #[serde(default = "default_file_level")]
    pub file_level: LogLevel,
}

fn default_timestamps() -> bool {
    true
}

fn default_file_level() -> LogLevel {
    LogLevel::Debug
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            format: OutputFormat::default(),
            timestamps: default_timestamps(),
            color: false,
            log_file: None,
            file_level: default_file_level(),
        }
    }
}

impl LogConfig {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Log file path with `~` expanded
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }
}

/// Get the base configuration directory (~/.chanlog)
/// Falls back to ./.chanlog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".chanlog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chanlog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}
