//! Error types for the launcher application.

use launcher_config_and_utils::CoreError;
use launcher_lifecycle::LifecycleError;
use project_layout::LayoutError;
use thiserror::Error;

/// Launcher error type.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// Project root is missing a sub-project directory
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),

    /// Internal phase ordering violation
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// The interrupt handler could not be installed
    #[error("Failed to listen for Ctrl+C: {0}")]
    Signal(#[source] std::io::Error),

    /// The launcher task panicked
    #[error("Launcher panicked: {0}")]
    Panicked(String),
}

/// Result type for launcher operations.
pub type LauncherResult<T> = Result<T, LauncherError>;
