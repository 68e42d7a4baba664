//! Logging facade for chanlog
//!
//! Provides the dual-channel logger with its unfiltered history, the formatter
//! and hook plug-in points, and a few ready-made adapters.

mod capture;
mod channel;
mod channel_logger;
mod entry;
mod error;
mod file_hook;
mod formatter;
mod history;
mod hook;
mod level;
mod logger;
mod plain;

pub use capture::CaptureWriter;
pub use channel::{Channel, ChannelKind, Sink};
pub use channel_logger::ChannelLogger;
pub use entry::{Fields, LogEntry};
pub use error::LogError;
pub use file_hook::{timestamped_log_path, FileHook};
pub use formatter::{Formatter, MessageFormatter, TextFormatter};
pub use history::History;
pub use hook::{Hook, LevelHooks};
pub use level::LogLevel;
pub use logger::{sprint, ExitHandler, Logger, FATAL_EXIT_CODE};
pub use plain::PlainLogger;
