//! Output hooks: side effects fired for admitted entries

use std::fmt;
use std::sync::Arc;

use super::entry::LogEntry;
use super::error::LogError;
use super::level::LogLevel;

/// A pluggable side effect run for each admitted entry at one of its levels
///
/// Failures go back to the channel, which reports them through `tracing` and
/// carries on. A hook must never log through the logger that fires it.
pub trait Hook: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Levels this hook wants to see
    fn levels(&self) -> &[LogLevel];

    fn fire(&self, entry: &LogEntry) -> Result<(), LogError>;
}

/// The set of hooks registered on one channel
#[derive(Default, Clone)]
pub struct LevelHooks {
    hooks: Vec<Arc<dyn Hook>>,
}

impl LevelHooks {
    /// Create an empty hook set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook; hooks fire in registration order
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    /// Get the number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Fire every hook registered for the entry's level
    ///
    /// Returns how many hooks succeeded. A failing hook does not stop the rest.
    pub fn fire(&self, entry: &LogEntry) -> usize {
        let mut fired = 0;
        for hook in &self.hooks {
            if !hook.levels().contains(&entry.level) {
                continue;
            }
            match hook.fire(entry) {
                Ok(()) => fired += 1,
                Err(e) => {
                    tracing::warn!(
                        hook = hook.name(),
                        level = %entry.level,
                        error = %e,
                        "log hook failed"
                    );
                }
            }
        }
        fired
    }
}

impl fmt::Debug for LevelHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}
