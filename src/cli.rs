use clap::Parser;
use std::path::PathBuf;

use crate::config::{logs_dir, LogConfig};
use crate::logging::{timestamped_log_path, LogLevel};

/// chanlog - run concurrent workers that report through one dual-channel logger
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Show debug messages on stderr
    #[clap(short = 'D', long)]
    pub debug: bool,

    /// Keep info messages off stdout
    #[clap(short = 'q', long)]
    pub quiet: bool,

    /// Append every written entry to this file
    #[clap(long)]
    pub log_file: Option<PathBuf>,

    /// Append to a new timestamped file under ~/.chanlog/logs
    #[clap(long, conflicts_with = "log_file")]
    pub save_log: bool,

    /// Lowest level written to the log file (debug, info, warn, error, fatal, panic)
    #[clap(long, value_name = "LEVEL")]
    pub file_level: Option<LogLevel>,

    /// Config file (defaults to ~/.chanlog/config.toml)
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Number of concurrent workers
    #[clap(short = 'w', long, default_value_t = 4)]
    pub workers: usize,

    /// Progress steps per worker
    #[clap(short = 's', long, default_value_t = 3)]
    pub steps: usize,

    /// Print the full, unfiltered transcript to stderr when done
    #[clap(long)]
    pub dump_history: bool,
}

impl Args {
    /// Overlay command-line flags on a loaded configuration
    ///
    /// An absent flag keeps the file's value.
    pub fn apply(&self, config: &mut LogConfig) {
        if self.debug {
            config.debug = true;
        }
        if self.quiet {
            config.quiet = true;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.to_string_lossy().into_owned());
        } else if self.save_log {
            let path = timestamped_log_path(&logs_dir(), "chanlog");
            config.log_file = Some(path.to_string_lossy().into_owned());
        }
        if let Some(level) = self.file_level {
            config.file_level = level;
        }
    }
}
