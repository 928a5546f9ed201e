// Rust guideline compliant 2026-02-06

//! Tracing subscriber setup for the relman binary.

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Logging options taken from the global flags.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Forces the `debug` level.
    pub debug: bool,
    /// Appends JSON lines to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

impl LogOptions {
    /// Returns the effective level.
    ///
    /// # Errors
    ///
    /// Returns an error if the level name is unknown.
    pub fn effective_level(&self) -> Result<Level> {
        if self.debug {
            return Ok(Level::DEBUG);
        }
        parse_log_level(&self.level)
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive until the process exits.
///
/// # Errors
///
/// Returns an error if the level is unknown or the log file cannot be opened.
pub fn init_tracing(options: &LogOptions) -> Result<Option<WorkerGuard>> {
    let level = options.effective_level()?;

    if let Some(path) = &options.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        install(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    install(subscriber);
    Ok(None)
}

/// Sets the global subscriber, reporting on stderr when one is already set.
///
/// Returns whether `subscriber` was installed.
fn install<S>(subscriber: S) -> bool
where
    S: Subscriber + Send + Sync + 'static,
{
    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("warning: logging not reconfigured: {}", err);
            false
        }
    }
}

/// Parses a level name, case-insensitively.
///
/// # Errors
///
/// Returns an error naming the accepted levels.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" | "warning" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => bail!(
            "Invalid log level '{}': expected error, warn, info, debug or trace",
            other
        ),
    }
}
