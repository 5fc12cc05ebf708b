//! Tracing subscriber setup.
//!
//! The terminal player owns the screen, so it only logs to a file (or not at
//! all). The contact server logs to stderr.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::LoggingSettings;

/// `RUST_LOG` wins over the configured filter.
fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `settings.file` for the terminal player.
///
/// Returns the writer guard, which must live until exit so buffered lines are
/// flushed. Nothing is installed when no file is configured.
pub fn init_for_tui(settings: &LoggingSettings) -> std::io::Result<Option<WorkerGuard>> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(None);
    };

    let file = open_log_file(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer)
        .init();

    Ok(Some(guard))
}

/// Log to stderr for `serve`.
pub fn init_for_server(settings: &LoggingSettings) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer)
        .init();
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}
