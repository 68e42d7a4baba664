//! chanlog - dual-channel leveled logging for command-line tools
//!
//! Info output and error/debug output go to two independently configurable
//! channels, while every message is also kept in an in-memory transcript.

#[macro_use]
mod macros;

pub mod cli;
pub mod config;
pub mod logging;

pub use logging::{ChannelKind, ChannelLogger, LogLevel, Logger, PlainLogger};
