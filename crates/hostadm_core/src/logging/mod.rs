//! Logging infrastructure for hostadm.
//!
//! This module provides:
//! - Global `tracing` setup with optional rolling file output
//! - An append-only audit trail of administrative actions
//!
//! # Example
//!
//! ```no_run
//! use hostadm_core::logging::{init_tracing, AuditLog, LogLevel};
//!
//! // Hold the guard for the lifetime of the process.
//! let _guard = init_tracing(LogLevel::Info, Some("/var/log/hostadm".as_ref()));
//!
//! let audit = AuditLog::open("/var/log/hostadm", None).unwrap();
//! audit.record("session started");
//! ```

mod audit;
mod types;

pub use audit::AuditLog;
pub use types::{AuditCallback, LogLevel};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
/// - Optionally mirrors events into a daily-rolled file under `log_dir`
///
/// Should be called once at application startup. The returned guard
/// must be kept alive while the process runs, or buffered file output
/// is lost.
pub fn init_tracing(default_level: LogLevel, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    let stderr_layer = fmt::layer().with_target(true).with_thread_ids(false);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "hostadm.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(filter)
                .init();
            None
        }
    }
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }

    #[test]
    fn level_maps_to_tracing() {
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::default().to_tracing_level(), tracing::Level::INFO);
    }
}
