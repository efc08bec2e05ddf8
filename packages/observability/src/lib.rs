//! # Observability
//!
//! Centralized structured logging for the portfolio dev tooling.
//!
//! Tools call [`init_with_config`] once at startup and then use the standard
//! `tracing` macros. Developer diagnostics end up as JSON lines in a log
//! file (one [`json_layer::LogEntry`] per event) so they never interleave
//! with the console output a tool renders for its user. A compact stderr
//! layer can be enabled for immediate feedback.
//!
//! ## Usage
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "launcher".into(),
//!     default_level: "debug".into(),
//!     log_path: Some(paths.log_file()),
//!     ..Default::default()
//! })?;
//!
//! tracing::info!("launcher started");
//! ```

mod file_writer;
mod json_layer;

use std::io;
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use file_writer::{LogFile, LogFileWriter};
pub use json_layer::{JsonLayer, LogEntry};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "launcher").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// JSONL log file. When `None`, only the stderr layer is installed.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr for immediate feedback.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Initialize logging with custom configuration.
///
/// Returns the I/O error if the log file cannot be opened; nothing is
/// installed in that case, so the caller may retry without a log path.
/// Installing a second subscriber in the same process is a no-op.
pub fn init_with_config(config: LogConfig) -> io::Result<()> {
    let file_layer = match &config.log_path {
        Some(path) => {
            let layer = JsonLayer::new(config.service_name.clone(), LogFile::open(path)?);
            Some(layer.with_filter(env_filter(&config.default_level)))
        }
        None => None,
    };

    // Without a file there is nowhere else for events to go.
    let stderr_enabled = config.also_stderr || config.log_path.is_none();
    let stderr_layer = if stderr_enabled {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_filter(env_filter(&config.default_level)),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            service = %config.service_name,
            log_path = ?config.log_path,
            "observability initialized"
        );
    }

    Ok(())
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
