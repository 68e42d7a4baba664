//! Log entries handed to formatters and hooks

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::level::LogLevel;

/// Structured key/value data attached to an entry, rendered in key order
pub type Fields = BTreeMap<String, serde_json::Value>;

/// A single log entry, as seen by formatters and hooks
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Timestamp when the entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Rendered message text
    pub message: String,
    /// Optional structured fields
    pub fields: Fields,
}

impl LogEntry {
    /// Create a new entry stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            fields: Fields::new(),
        }
    }

    /// Attach a single field
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attach a set of fields, replacing any with the same key
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }
}
