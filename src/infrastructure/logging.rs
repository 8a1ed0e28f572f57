use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::DomainError;

/// Initialize the logging system with console output and file rotation.
///
/// Returns a guard that must be kept alive for the duration of the application.
/// When the guard is dropped, any remaining logs are flushed.
pub fn init_logging(
    logs_dir: &Path,
    level: &str,
    file_logging: bool,
    max_files: usize,
) -> Result<Option<WorkerGuard>, DomainError> {
    // Ensure logs directory exists
    if file_logging {
        fs::create_dir_all(logs_dir)?;
    }

    // Environment filter with default from config
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("banner_studio={},warn", level)));

    // Console layer (always enabled, pretty format for development)
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(env_filter.clone());

    if file_logging {
        // File appender with daily rotation, keeping at most `max_files` files
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("banner-studio.log")
            .max_log_files(max_files.max(1))
            .build(logs_dir)
            .map_err(|e| DomainError::Config(format!("Failed to create log appender: {}", e)))?;

        // Non-blocking writer for the file appender
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // File layer with JSON format
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(format!("banner_studio={}", level)));

        // Combine layers - use try_init to avoid panic if called twice
        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_ok()
        {
            tracing::info!(
                logs_dir = ?logs_dir,
                level = level,
                "Logging initialized with file output"
            );
        }

        Ok(Some(guard))
    } else {
        // Console only - use try_init to avoid panic if called twice
        let _ = tracing_subscriber::registry()
            .with(console_layer)
            .try_init();

        tracing::info!(level = level, "Logging initialized (console only)");

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_file_logging_creates_logs_dir() {
        let temp_dir = env::temp_dir().join("banner_log_test");
        let _ = fs::remove_dir_all(&temp_dir);

        // Only one subscriber can be installed per process; the guard is returned either way
        let guard = init_logging(&temp_dir, "debug", true, 3).unwrap();
        assert!(guard.is_some());
        assert!(temp_dir.exists());
        tracing::info!(test = "logging", "Banner log line");
        drop(guard);

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_console_only_skips_logs_dir() {
        let temp_dir = env::temp_dir().join("banner_log_console_test");
        let _ = fs::remove_dir_all(&temp_dir);

        let guard = init_logging(&temp_dir, "info", false, 3).unwrap();
        assert!(guard.is_none());
        assert!(!temp_dir.exists());
    }
}
