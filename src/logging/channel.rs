//! A single leveled output channel

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use super::entry::LogEntry;
use super::error::LogError;
use super::formatter::{Formatter, MessageFormatter};
use super::hook::{Hook, LevelHooks};
use super::level::LogLevel;

/// Writable destination of a channel
pub type Sink = Box<dyn Write + Send>;

/// Which of the logger's two channels a setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Normal tool output (info level)
    Out,
    /// Errors, warnings and debug output
    Err,
}

impl ChannelKind {
    /// Channel a message of `level` is routed to
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => ChannelKind::Out,
            _ => ChannelKind::Err,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Out => write!(f, "out"),
            ChannelKind::Err => write!(f, "err"),
        }
    }
}

/// Threshold, destination, formatter and hooks of one channel
pub struct Channel {
    threshold: LogLevel,
    out: Sink,
    formatter: Arc<dyn Formatter>,
    hooks: LevelHooks,
}

impl Channel {
    /// Channel at Info level writing bare messages to `out`
    pub fn new(out: Sink) -> Self {
        Self {
            threshold: LogLevel::Info,
            out,
            formatter: Arc::new(MessageFormatter),
            hooks: LevelHooks::new(),
        }
    }

    /// Get the lowest level this channel writes
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    /// Change the lowest level this channel writes
    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
    }

    /// Swap the destination, returning the previous one
    pub fn set_out(&mut self, out: Sink) -> Sink {
        let mut previous = std::mem::replace(&mut self.out, out);
        let _ = previous.flush();
        previous
    }

    /// Render later entries with `formatter`
    pub fn set_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.formatter = formatter;
    }

    /// Fire `hook` for admitted entries at its levels
    pub fn add_hook(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.add(hook);
    }

    pub fn hooks(&self) -> &LevelHooks {
        &self.hooks
    }

    /// Check if an entry at `level` passes the threshold
    pub fn admits(&self, level: LogLevel) -> bool {
        level.passes(self.threshold)
    }

    /// Fire hooks, render and write an entry if the threshold admits it
    ///
    /// Returns `Ok(false)` when the entry was filtered out.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<bool, LogError> {
        if !self.admits(entry.level) {
            return Ok(false);
        }

        if !self.hooks.is_empty() {
            self.hooks.fire(entry);
        }

        let text = self.formatter.format(entry)?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(true)
    }

    /// Flush the destination
    pub fn flush(&mut self) -> Result<(), LogError> {
        self.out.flush()?;
        Ok(())
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("threshold", &self.threshold)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::CaptureWriter;
    use crate::logging::formatter::TextFormatter;
    use crate::logging::hook::tests::RecordingHook;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_routing() {
        assert_eq!(ChannelKind::for_level(LogLevel::Info), ChannelKind::Out);
        for level in [
            LogLevel::Debug,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Fatal,
            LogLevel::Panic,
        ] {
            assert_eq!(ChannelKind::for_level(level), ChannelKind::Err);
        }
    }

    #[test]
    fn test_threshold_filters_output() {
        let capture = CaptureWriter::new();
        let mut channel = Channel::new(Box::new(capture.clone()));
        assert_eq!(channel.threshold(), LogLevel::Info);

        assert!(!channel.emit(&LogEntry::new(LogLevel::Debug, "debug")).unwrap());
        assert!(channel.emit(&LogEntry::new(LogLevel::Info, "info")).unwrap());
        assert_eq!(capture.contents(), "info\n");

        channel.set_threshold(LogLevel::Debug);
        assert!(channel.emit(&LogEntry::new(LogLevel::Debug, "debug")).unwrap());
        assert_eq!(capture.lines(), vec!["info", "debug"]);
    }

    #[test]
    fn test_set_out_redirects_later_writes() {
        let first = CaptureWriter::new();
        let second = CaptureWriter::new();
        let mut channel = Channel::new(Box::new(first.clone()));

        channel.emit(&LogEntry::new(LogLevel::Error, "one")).unwrap();
        channel.set_out(Box::new(second.clone()));
        channel.emit(&LogEntry::new(LogLevel::Error, "two")).unwrap();

        assert_eq!(first.contents(), "one\n");
        assert_eq!(second.contents(), "two\n");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut channel = Channel::new(Box::new(BrokenPipe));
        let result = channel.emit(&LogEntry::new(LogLevel::Error, "lost"));
        assert!(matches!(result, Err(LogError::SinkWrite(_))));
    }

    #[test]
    fn test_format_failure_skips_write_but_fires_hooks() {
        let capture = CaptureWriter::new();
        let hook = Arc::new(RecordingHook::new(&LogLevel::ALL));
        let mut channel = Channel::new(Box::new(capture.clone()));
        channel.set_formatter(Arc::new(TextFormatter::new()));
        channel.add_hook(hook.clone());

        let entry = LogEntry::new(LogLevel::Warn, "bad field").with_field("has space", 1);
        assert!(matches!(channel.emit(&entry), Err(LogError::Format { .. })));
        assert!(capture.is_empty());
        assert_eq!(hook.fired(), vec!["bad field"]);
    }

    #[test]
    fn test_hooks_skip_filtered_entries() {
        let hook = Arc::new(RecordingHook::new(&LogLevel::ALL));
        let mut channel = Channel::new(Box::new(CaptureWriter::new()));
        channel.add_hook(hook.clone());

        channel.emit(&LogEntry::new(LogLevel::Debug, "filtered")).unwrap();
        channel.emit(&LogEntry::new(LogLevel::Warn, "admitted")).unwrap();
        assert_eq!(hook.fired(), vec!["admitted"]);
        assert_eq!(channel.hooks().len(), 1);
    }
}
