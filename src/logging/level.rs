//! Severity levels shared by both output channels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LogError;

/// Log severity, ordered from least to most severe
///
/// Deserializes through [`FromStr`], so config files accept the same names as
/// the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    /// Every level, least severe first
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Panic,
    ];

    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Panic => "PANIC",
        }
    }

    /// Whether a channel with `threshold` writes messages of this level
    pub fn passes(self, threshold: LogLevel) -> bool {
        self >= threshold
    }

    /// All levels at or above `min`
    pub fn at_least(min: LogLevel) -> Vec<LogLevel> {
        Self::ALL.iter().copied().filter(|l| l.passes(min)).collect()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;

    fn try_from(s: String) -> Result<Self, <LogLevel as TryFrom<String>>::Error> {
        s.parse()
    }
}
