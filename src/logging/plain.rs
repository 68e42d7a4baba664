//! Formatter-free logger that prints bare lines
//!
//! Suited to scripted output where every line must be exactly the message.
//! Unlike [`ChannelLogger`](super::ChannelLogger), warnings and errors go to the
//! out writer, and `redirect_stdout_to_stderr` really sends them to the err
//! writer.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::channel::Sink;
use super::history::History;
use super::level::LogLevel;
use super::logger::{process_exit, ExitHandler, Logger};

struct Writers {
    out: Sink,
    err: Sink,
}

/// Plain two-writer logger with history
pub struct PlainLogger {
    writers: Mutex<Writers>,
    debug: AtomicBool,
    redirected: AtomicBool,
    history: History,
    exit_handler: ExitHandler,
}

impl PlainLogger {
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(out: Sink, err: Sink) -> Self {
        Self {
            writers: Mutex::new(Writers { out, err }),
            debug: AtomicBool::new(false),
            redirected: AtomicBool::new(false),
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

    fn write_line(&self, to_err: bool, line: &str) {
        let mut writers = self.writers.lock().unwrap_or_else(PoisonError::into_inner);
        let sink = if to_err {
            &mut writers.err
        } else {
            &mut writers.out
        };
        if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
            tracing::warn!(error = %e, "dropped log output");
        }
    }
}

impl Default for PlainLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for PlainLogger {
    fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::SeqCst);
    }

    fn redirect_stdout_to_stderr(&self) {
        self.redirected.store(true, Ordering::SeqCst);
    }

    fn set_err_writer(&self, out: Sink) {
        self.writers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .err = out;
    }

    fn set_out_writer(&self, out: Sink) {
        self.writers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .out = out;
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let line = args.to_string();
        self.history.record(line.as_str());

        match level {
            LogLevel::Debug => {
                if self.debug.load(Ordering::SeqCst) {
                    self.write_line(true, &line);
                }
            }
            LogLevel::Info | LogLevel::Warn | LogLevel::Error => {
                self.write_line(self.redirected.load(Ordering::SeqCst), &line);
            }
            LogLevel::Fatal | LogLevel::Panic => self.write_line(true, &line),
        }
    }

    fn history(&self) -> Vec<String> {
        self.history.snapshot()
    }

    fn terminate(&self, code: i32) -> ! {
        {
            let mut writers = self.writers.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = writers.out.flush();
            let _ = writers.err.flush();
        }
        (self.exit_handler)(code);
        std::process::exit(code)
    }
}

impl fmt::Debug for PlainLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainLogger")
            .field("debug", &self.debug.load(Ordering::SeqCst))
            .field("redirected", &self.redirected.load(Ordering::SeqCst))
            .field("history_len", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::CaptureWriter;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::AtomicI32;
    use std::sync::Arc;

    fn capturing_logger() -> (PlainLogger, CaptureWriter, CaptureWriter) {
        let out = CaptureWriter::new();
        let err = CaptureWriter::new();
        let logger = PlainLogger::with_writers(Box::new(out.clone()), Box::new(err.clone()));
        (logger, out, err)
    }

    #[test]
    fn test_plain_debug() {
        let (logger, _out, err) = capturing_logger();
        logger.debug("hidden");
        assert!(err.is_empty());

        logger.set_debug(true);
        logger.debug("debug");
        assert_eq!(err.contents(), "debug\n");
    }

    #[test]
    fn test_plain_info_warn_error_go_to_out() {
        let (logger, out, err) = capturing_logger();
        logger.info("info");
        logger.warn("warn");
        logger.error("error");

        assert_eq!(out.lines(), vec!["info", "warn", "error"]);
        assert!(err.is_empty());
    }

    #[test]
    fn test_plain_redirect_moves_output() {
        let (logger, out, err) = capturing_logger();
        logger.redirect_stdout_to_stderr();
        logger.info("info");
        logger.errorf(format_args!("code {}", 7));

        assert!(out.is_empty());
        assert_eq!(err.lines(), vec!["info", "code 7"]);
    }

    #[test]
    fn test_plain_fatal_writes_to_err_even_when_redirected() {
        let exit_code = Arc::new(AtomicI32::new(0));
        let seen = Arc::clone(&exit_code);
        let out = CaptureWriter::new();
        let err = CaptureWriter::new();
        let logger = PlainLogger::with_writers(Box::new(out.clone()), Box::new(err.clone()))
            .with_exit_handler(move |code| {
                seen.store(code, Ordering::SeqCst);
                panic!("exit intercepted");
            });
        logger.redirect_stdout_to_stderr();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.fatal("x");
        }));

        assert!(result.is_err());
        assert_eq!(exit_code.load(Ordering::SeqCst), 1);
        assert_eq!(err.contents(), "x\n");
        assert!(out.is_empty());
        assert_eq!(logger.history(), vec!["x"]);
    }

    #[test]
    fn test_plain_fatal_ignores_out_writer() {
        let (logger, out, err) = capturing_logger();
        let logger = logger.with_exit_handler(|_| panic!("exit intercepted"));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.fatalf(format_args!("giving up after {} tries", 3));
        }));

        assert!(result.is_err());
        assert!(out.is_empty());
        assert_eq!(err.lines(), vec!["giving up after 3 tries"]);
    }

    #[test]
    fn test_plain_panicf_writes_to_err_then_panics() {
        let (logger, out, err) = capturing_logger();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.panicf(format_args!("bad state {}", 9));
        }));

        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("bad state 9")
        );
        assert_eq!(err.contents(), "bad state 9\n");
        assert!(out.is_empty());
        assert_eq!(logger.history(), vec!["bad state 9"]);
    }

    #[test]
    fn test_plain_history_includes_suppressed_debug() {
        let (logger, _out, _err) = capturing_logger();
        logger.debug("debug");
        logger.info("info");
        assert_eq!(logger.history(), vec!["debug", "info"]);
    }

    #[test]
    fn test_plain_writer_swap() {
        let (logger, first, _err) = capturing_logger();
        let second = CaptureWriter::new();
        logger.info("one");
        logger.set_out_writer(Box::new(second.clone()));
        logger.info("two");

        assert_eq!(first.contents(), "one\n");
        assert_eq!(second.contents(), "two\n");
    }
}
