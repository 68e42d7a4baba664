//! Hook that appends formatted entries to a log file
//!
//! The file is opened in append-create mode and closed again on every entry, so
//! no handle is held between calls and external tools can move the file away.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::entry::LogEntry;
use super::error::LogError;
use super::formatter::{Formatter, TextFormatter};
use super::hook::Hook;
use super::level::LogLevel;

/// Generate a timestamped log file path: `<prefix>-YYYY-mm-dd_HH-MM-SS.log`
pub fn timestamped_log_path(logs_dir: &Path, prefix: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    logs_dir.join(format!("{}-{}.log", prefix, timestamp))
}

/// Appends every entry at its levels to a file
pub struct FileHook {
    path: PathBuf,
    formatter: Box<dyn Formatter>,
    levels: Vec<LogLevel>,
}

impl FileHook {
    /// Hook for all levels, using a timestamped [`TextFormatter`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            formatter: Box::new(TextFormatter::new()),
            levels: LogLevel::ALL.to_vec(),
        }
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_levels(mut self, levels: &[LogLevel]) -> Self {
        self.levels = levels.to_vec();
        self
    }

    fn hook_error(&self, source: std::io::Error) -> LogError {
        LogError::Hook {
            hook: self.name().to_string(),
            source,
        }
    }
}

impl Hook for FileHook {
    fn name(&self) -> &str {
        "file"
    }

    fn levels(&self) -> &[LogLevel] {
        &self.levels
    }

    fn fire(&self, entry: &LogEntry) -> Result<(), LogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to open log file");
                self.hook_error(e)
            })?;

        let text = self.formatter.format(entry).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to format log entry");
            e
        })?;

        file.write_all(text.as_bytes()).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to append to log file");
            self.hook_error(e)
        })
    }
}

impl std::fmt::Debug for FileHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHook")
            .field("path", &self.path)
            .field("levels", &self.levels)
            .finish()
    }
}
