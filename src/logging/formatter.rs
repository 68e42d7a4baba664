//! Entry formatters
//!
//! A formatter turns one [`LogEntry`] into the exact text a channel writes,
//! trailing newline included.

use colored::{ColoredString, Colorize};

use super::entry::LogEntry;
use super::error::LogError;
use super::level::LogLevel;

/// Renders entries for a channel or hook
pub trait Formatter: Send + Sync {
    /// Render an entry. Fails only when a field cannot be represented.
    fn format(&self, entry: &LogEntry) -> Result<String, LogError>;
}

/// Writes the bare message, one per line
///
/// This is the default for both channels: tool output stays clean and
/// copy-pasteable.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String, LogError> {
        Ok(format!("{}\n", entry.message))
    }
}

/// Line-oriented formatter: `[timestamp] LEVEL message key=value ...`
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    timestamps: bool,
    color: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFormatter {
    /// Timestamps on, color off
    pub fn new() -> Self {
        Self {
            timestamps: true,
            color: false,
        }
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Color the whole line by level
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String, LogError> {
        let mut line = String::new();

        if self.timestamps {
            line.push_str(&entry.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true));
            line.push(' ');
        }
        line.push_str(&format!("{:<5} {}", entry.level.as_str(), entry.message));

        for (key, value) in &entry.fields {
            validate_key(key)?;
            line.push(' ');
            line.push_str(key);
            line.push('=');
            line.push_str(&render_value(value));
        }

        if self.color {
            line = colorize(entry.level, &line).to_string();
        }
        line.push('\n');
        Ok(line)
    }
}

fn validate_key(key: &str) -> Result<(), LogError> {
    if key.is_empty() {
        return Err(LogError::Format {
            field: key.to_string(),
            reason: "empty field name",
        });
    }
    if key.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(LogError::Format {
            field: key.to_string(),
            reason: "field name contains whitespace or '='",
        });
    }
    Ok(())
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) if needs_quoting(s) => {
            serde_json::to_string(s).unwrap_or_else(|_| s.clone())
        }
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"' || c == '=')
}

fn colorize(level: LogLevel, line: &str) -> ColoredString {
    match level {
        LogLevel::Debug => line.blue(),
        LogLevel::Info => line.white(),
        LogLevel::Warn => line.yellow(),
        LogLevel::Error => line.red(),
        LogLevel::Fatal | LogLevel::Panic => line.red().bold(),
    }
}
