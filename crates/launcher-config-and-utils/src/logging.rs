//! Logging initialization for the launcher.
//!
//! Thin wrapper over the observability crate. Developer diagnostics go to
//! `~/.portfolio-dev/logs/launcher.jsonl` so they never mix with the
//! multiplexed child output on the console.

use observability::LogConfig;
use std::path::{Path, PathBuf};

/// Service name stamped on every log line.
pub const SERVICE_NAME: &str = "launcher";

/// Where diagnostics ended up after initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// JSONL file, optionally mirrored to stderr.
    File(PathBuf),
    /// The log file could not be opened; stderr only.
    StderrFallback,
}

/// Initialize the logging system for the launcher.
///
/// Falls back to stderr-only logging if the log file cannot be opened.
///
/// # Example
///
/// ```ignore
/// init_logging(&paths.log_file(), "info", false);
/// tracing::info!("Launcher started");
/// ```
pub fn init_logging(log_file: &Path, level: &str, also_stderr: bool) -> LogDestination {
    let file_config = LogConfig {
        service_name: SERVICE_NAME.into(),
        default_level: level.into(),
        log_path: Some(log_file.to_path_buf()),
        also_stderr,
    };

    match observability::init_with_config(file_config) {
        Ok(()) => LogDestination::File(log_file.to_path_buf()),
        Err(err) => {
            // Nothing was installed; no file means stderr is always on.
            let _ = observability::init_with_config(LogConfig {
                service_name: SERVICE_NAME.into(),
                default_level: level.into(),
                log_path: None,
                also_stderr: true,
            });
            tracing::warn!(
                event_code = "launcher.logging.file_unavailable",
                log_path = %log_file.display(),
                error = %err,
                "Log file unavailable, logging to stderr"
            );
            LogDestination::StderrFallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_when_log_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let destination = init_logging(dir.path(), "info", false);
        assert_eq!(destination, LogDestination::StderrFallback);
    }

    #[test]
    fn creates_log_directory_under_fresh_base() {
        let dir = tempfile::tempdir().unwrap();
        let paths = crate::Paths::with_base_dir(dir.path().join("portfolio-dev"));
        assert!(!paths.logs_dir().exists());

        let destination = init_logging(&paths.log_file(), "info", false);

        assert_eq!(destination, LogDestination::File(paths.log_file()));
        assert!(paths.logs_dir().is_dir());
        assert!(paths.log_file().is_file());
    }
}
