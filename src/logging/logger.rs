//! The logging facade every component receives
//!
//! Components take a `&dyn Logger` (or an `Arc` of a concrete logger) instead
//! of reaching for a global, so tests can run isolated loggers side by side.

use std::fmt;

use super::channel::Sink;
use super::level::LogLevel;

/// Exit status used by [`Logger::fatal`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called by [`Logger::terminate`] before the process exits
pub type ExitHandler = Box<dyn Fn(i32) + Send + Sync>;

pub(crate) fn process_exit() -> ExitHandler {
    Box::new(|code| std::process::exit(code))
}

/// Concatenate the `Display` output of each part with no separator
pub fn sprint(parts: &[&dyn fmt::Display]) -> String {
    let mut out = String::new();
    for part in parts {
        out.push_str(&part.to_string());
    }
    out
}

/// Dual-channel leveled logger with an unfiltered history
///
/// Info goes to the out channel; every other level goes to the err channel.
/// Every emit call appends exactly one entry to [`Logger::history`], whether or
/// not a channel actually writes it.
pub trait Logger: Send + Sync {
    /// Show debug output on the err channel (or hide it again)
    fn set_debug(&self, enabled: bool);

    /// Keep info output from corrupting the tool's stdout
    fn redirect_stdout_to_stderr(&self);

    /// Replace the err channel's destination
    fn set_err_writer(&self, out: Sink);

    /// Replace the out channel's destination
    fn set_out_writer(&self, out: Sink);

    /// Record and dispatch one message at `level`
    ///
    /// Never exits or panics, even for [`LogLevel::Fatal`] and
    /// [`LogLevel::Panic`]; the `fatal*`/`panic*` helpers add that.
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);

    /// Every message emitted so far, in order
    fn history(&self) -> Vec<String>;

    /// Flush output and end the process with `code`
    fn terminate(&self, code: i32) -> !;

    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, format_args!("{}", msg));
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, format_args!("{}", msg));
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, format_args!("{}", msg));
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, format_args!("{}", msg));
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    /// Log at Fatal level, then terminate the whole process
    ///
    /// This does not return: after the message is recorded and written the
    /// process exits with [`FATAL_EXIT_CODE`], skipping destructors and any
    /// caller cleanup.
    fn fatal(&self, msg: &str) -> ! {
        self.log(LogLevel::Fatal, format_args!("{}", msg));
        self.terminate(FATAL_EXIT_CODE)
    }

    /// Formatted [`Logger::fatal`]; also terminates the process
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(LogLevel::Fatal, args);
        self.terminate(FATAL_EXIT_CODE)
    }

    /// Log at Panic level, then panic with the message
    fn panic(&self, msg: &str) -> ! {
        self.log(LogLevel::Panic, format_args!("{}", msg));
        panic!("{}", msg)
    }

    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.log(LogLevel::Panic, format_args!("{}", msg));
        panic!("{}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprint_has_no_separator() {
        assert_eq!(sprint(&[&"machine", &1, &'-', &2.5]), "machine1-2.5");
        assert_eq!(sprint(&[]), "");
    }
}
