//! Tracing setup
//!
//! The terminal is in raw mode while the editor runs, so there is no console
//! layer: everything goes to `~/.config/jk/logs/jk.log` with daily rotation.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs, including unbound keys
//! - `RUST_LOG=jk::model=trace` - cursor movement
//! - `RUST_LOG=jk::keymap=debug` - keymap loading

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the file subscriber.
///
/// Filtering respects RUST_LOG and defaults to `info`. The returned guard
/// flushes buffered lines when dropped, so keep it alive for the whole run.
/// Returns `None` if the log directory cannot be created.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let logs_dir = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            return None;
        }
    };

    let file_appender = tracing_appender::rolling::daily(logs_dir, "jk.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();

    Some(guard)
}
