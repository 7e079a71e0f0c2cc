use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Maps `-q` and the number of `-v` flags to the most verbose level shown.
fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: compact coloured output on stderr, plus a plain-text copy
/// with thread ids and targets when `log_file` is given.
///
/// Structure failures in a batch are logged from worker threads with `structure` and `error`
/// fields, so the file copy is the place to read them back per thread.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(File::create(&path)?)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(true),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(level_for(verbosity, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}
