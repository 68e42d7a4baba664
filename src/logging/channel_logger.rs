//! The dual-channel logger
//!
//! Two [`Channel`]s, each behind its own mutex, plus a shared [`History`].
//! A channel's lock is held across the whole threshold check, format and write,
//! so swapping a destination never tears a line in half.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};

use crate::config::{LogConfig, OutputFormat};

use super::channel::{Channel, ChannelKind, Sink};
use super::entry::{Fields, LogEntry};
use super::file_hook::FileHook;
use super::formatter::{Formatter, TextFormatter};
use super::history::History;
use super::hook::Hook;
use super::level::LogLevel;
use super::logger::{process_exit, ExitHandler, Logger};

/// Logger with separate out (info) and err (everything else) channels
pub struct ChannelLogger {
    out: Mutex<Channel>,
    err: Mutex<Channel>,
    history: History,
    exit_handler: ExitHandler,
}

impl ChannelLogger {
    /// Logger writing info to stdout and everything else to stderr
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Logger writing to the given out and err destinations
    pub fn with_writers(out: Sink, err: Sink) -> Self {
        Self {
            out: Mutex::new(Channel::new(out)),
            err: Mutex::new(Channel::new(err)),
            history: History::new(),
            exit_handler: process_exit(),
        }
    }

    /// Replace what happens on fatal termination
    ///
    /// If the handler returns, the process still exits.
    pub fn with_exit_handler(mut self, handler: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit_handler = Box::new(handler);
        self
    }

    /// Build a stdout/stderr logger from configuration
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        let logger = Self::new();
        logger.set_debug(config.debug);
        if config.quiet {
            logger.redirect_stdout_to_stderr();
        }

        if config.format == OutputFormat::Text {
            let formatter: Arc<dyn Formatter> = Arc::new(
                TextFormatter::new()
                    .with_timestamps(config.timestamps)
                    .with_color(config.color),
            );
            logger.set_formatter(ChannelKind::Out, Arc::clone(&formatter));
            logger.set_formatter(ChannelKind::Err, formatter);
        }

        if let Some(path) = config.log_file_path() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let hook: Arc<dyn Hook> =
                Arc::new(FileHook::new(path).with_levels(&LogLevel::at_least(config.file_level)));
            logger.add_hook(ChannelKind::Out, Arc::clone(&hook));
            logger.add_hook(ChannelKind::Err, hook);
        }

        Ok(logger)
    }

    /// Get the out channel's threshold
    pub fn out_level(&self) -> LogLevel {
        self.channel(ChannelKind::Out).threshold()
    }

    /// Get the err channel's threshold
    pub fn err_level(&self) -> LogLevel {
        self.channel(ChannelKind::Err).threshold()
    }

    /// Set the out channel's threshold
    pub fn set_out_level(&self, level: LogLevel) {
        self.channel(ChannelKind::Out).set_threshold(level);
    }

    /// Set the err channel's threshold
    pub fn set_err_level(&self, level: LogLevel) {
        self.channel(ChannelKind::Err).set_threshold(level);
    }

    /// Same as [`Logger::redirect_stdout_to_stderr`]: raises the out channel to Error
    pub fn silence_info_channel(&self) {
        self.set_out_level(LogLevel::Error);
    }

    pub fn set_formatter(&self, kind: ChannelKind, formatter: Arc<dyn Formatter>) {
        self.channel(kind).set_formatter(formatter);
    }

    pub fn add_hook(&self, kind: ChannelKind, hook: Arc<dyn Hook>) {
        self.channel(kind).add_hook(hook);
    }

    /// Emit a message with structured fields
    ///
    /// History records the message text only.
    pub fn log_fields(&self, level: LogLevel, message: &str, fields: Fields) {
        self.dispatch(LogEntry::new(level, message).with_fields(fields));
    }

    /// Shared history, for callers that want `len` without a copy
    pub fn history_buffer(&self) -> &History {
        &self.history
    }

    fn dispatch(&self, entry: LogEntry) {
        self.history.record(entry.message.clone());

        let kind = ChannelKind::for_level(entry.level);
        let mut channel = self.channel(kind);
        if let Err(e) = channel.emit(&entry) {
            tracing::warn!(channel = %kind, level = %entry.level, error = %e, "dropped log output");
        }
    }

    fn channel(&self, kind: ChannelKind) -> MutexGuard<'_, Channel> {
        let lock = match kind {
            ChannelKind::Out => &self.out,
            ChannelKind::Err => &self.err,
        };
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ChannelLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ChannelLogger {
    fn set_debug(&self, enabled: bool) {
        let level = if enabled { LogLevel::Debug } else { LogLevel::Info };
        self.set_err_level(level);
    }

    /// Raises the out channel threshold to Error; output is not merged
    fn redirect_stdout_to_stderr(&self) {
        self.silence_info_channel();
    }

    fn set_err_writer(&self, out: Sink) {
        self.channel(ChannelKind::Err).set_out(out);
    }

    fn set_out_writer(&self, out: Sink) {
        self.channel(ChannelKind::Out).set_out(out);
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.dispatch(LogEntry::new(level, args.to_string()));
    }

    fn history(&self) -> Vec<String> {
        self.history.snapshot()
    }

    fn terminate(&self, code: i32) -> ! {
        for kind in [ChannelKind::Out, ChannelKind::Err] {
            let _ = self.channel(kind).flush();
        }
        (self.exit_handler)(code);
        std::process::exit(code)
    }
}

impl fmt::Debug for ChannelLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelLogger")
            .field("out", &*self.channel(ChannelKind::Out))
            .field("err", &*self.channel(ChannelKind::Err))
            .field("history_len", &self.history.len())
            .finish()
    }
}
