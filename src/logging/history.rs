//! In-memory transcript of every emitted message
//!
//! Unlike channel output, the history is never filtered by level: a message
//! suppressed by a channel threshold is still recorded here, so tooling such as
//! crash reports can show the whole run.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe, append-only list of rendered messages
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rendered message
    pub fn record(&self, text: impl Into<String>) {
        self.lock().push(text.into());
    }

    /// Copy of all messages in the order they were recorded
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Get the number of recorded messages
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-pushed Vec, so the
    // data behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_history_record_and_snapshot() {
        let history = History::new();
        assert!(history.is_empty());

        history.record("debug");
        history.record(String::from("info"));
        history.record(format!("{}", "error"));

        assert_eq!(history.len(), 3);
        assert_eq!(history.snapshot(), vec!["debug", "info", "error"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let history = History::new();
        history.record("first");
        let before = history.snapshot();
        history.record("second");

        assert_eq!(before, vec!["first"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let history = Arc::new(History::new());
        let threads = 16;
        let per_thread = 250;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let history = Arc::clone(&history);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        history.record(format!("{}-{}", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut entries = history.snapshot();
        assert_eq!(entries.len(), threads * per_thread);
        entries.sort();
        entries.dedup();
        assert_eq!(entries.len(), threads * per_thread);
    }

    #[test]
    fn test_per_thread_order_is_preserved() {
        let history = Arc::new(History::new());
        let writer = {
            let history = Arc::clone(&history);
            thread::spawn(move || {
                for i in 0..100 {
                    history.record(format!("a{}", i));
                }
            })
        };
        for i in 0..100 {
            history.record(format!("b{}", i));
        }
        writer.join().unwrap();

        let entries = history.snapshot();
        let a: Vec<_> = entries.iter().filter(|e| e.starts_with('a')).cloned().collect();
        let expected: Vec<_> = (0..100).map(|i| format!("a{}", i)).collect();
        assert_eq!(a, expected);
    }

    #[test]
    fn test_record_survives_poisoned_lock() {
        let history = Arc::new(History::new());
        history.record("before");

        let poisoner = Arc::clone(&history);
        let _ = thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("poison the history lock");
        })
        .join();

        history.record("after");
        assert_eq!(history.snapshot(), vec!["before", "after"]);
    }
}
