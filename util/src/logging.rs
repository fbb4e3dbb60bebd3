//! Tracing subscriber setup shared by binaries.
//!
//! Library crates only emit `tracing` events; a binary calls [`init_logging`]
//! once at start-up and keeps the returned guard alive until exit so the
//! non-blocking file writer flushes.

use std::fs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `LOG_LEVEL` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "function_tester=info";

/// Builds the filter from `LOG_LEVEL`, falling back to `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber: daily rolling file output, plus stdout when requested.
pub fn init_logging(log_dir: &str, log_file: &str, log_to_stdout: bool) -> WorkerGuard {
    fs::create_dir_all(log_dir).ok();

    let file_appender = rolling::daily(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(file_layer);

    // `try_init` so a second call (e.g. from tests) does not panic.
    if log_to_stdout {
        registry.with(stdout_layer).try_init().ok();
    } else {
        registry.try_init().ok();
    }

    guard
}
