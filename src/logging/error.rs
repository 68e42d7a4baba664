//! Failure taxonomy for the logging facade
//!
//! None of these reach the caller of an emit method. They are reported through
//! `tracing` and dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    /// A structured field could not be rendered by the formatter
    #[error("cannot render field `{field}`: {reason}")]
    Format { field: String, reason: &'static str },

    /// The channel destination rejected the write
    #[error("failed to write log output: {0}")]
    SinkWrite(#[from] std::io::Error),

    /// An output hook's side effect failed
    #[error("log hook `{hook}` failed: {source}")]
    Hook {
        hook: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown log level `{0}`")]
    UnknownLevel(String),
}
