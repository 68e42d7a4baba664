use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use chanlog::cli::Args;
use chanlog::config::LogConfig;
use chanlog::{log_debug, log_info, log_warn, ChannelLogger, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics about the logger itself (failed writes, hook errors).
    // Control with RUST_LOG, e.g. RUST_LOG=chanlog=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chanlog=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LogConfig::load_from(path)?,
        None => LogConfig::load()?,
    };
    args.apply(&mut config);
    tracing::debug!(?config, "resolved logger configuration");

    let logger = Arc::new(ChannelLogger::from_config(&config)?);
    if let Some(path) = config.log_file_path() {
        log_debug!(logger, "appending log entries to {}", path.display());
    }

    log_info!(logger, "starting {} workers", args.workers);

    let mut handles = Vec::with_capacity(args.workers);
    for id in 0..args.workers {
        let logger = Arc::clone(&logger);
        let steps = args.steps;
        handles.push(tokio::task::spawn_blocking(move || {
            run_worker(&*logger, id, steps)
        }));
    }
    for handle in handles {
        handle.await?;
    }

    log_info!(logger; "all ", args.workers, " workers finished");

    if args.dump_history {
        for line in logger.history() {
            eprintln!("{}", line);
        }
    }

    Ok(())
}

/// Simulated unit of work reporting progress
fn run_worker(logger: &dyn Logger, id: usize, steps: usize) {
    for step in 1..=steps {
        log_debug!(logger, "worker {}: step {}/{}", id, step, steps);
    }
    if steps == 0 {
        log_warn!(logger, "worker {} had nothing to do", id);
    }
    log_info!(logger, "worker {} done", id);
}
