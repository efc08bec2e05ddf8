//! Core configuration and utilities for the portfolio dev launcher.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{
    CommandOverride, Directories, Endpoints, LauncherConfig, ServiceOverrides, Timings,
    CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_PROJECT_NAME, LOG_LEVEL_ENV,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, LogDestination, SERVICE_NAME};
pub use paths::Paths;
