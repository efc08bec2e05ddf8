//! File system paths for the launcher.

use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Runtime directory name under the home directory.
const BASE_DIR_NAME: &str = ".portfolio-dev";
/// JSONL log filename under the logs directory.
const LOG_FILE_NAME: &str = "launcher.jsonl";

/// Manages file system paths for the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Base directory for launcher runtime files (~/.portfolio-dev)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.portfolio-dev`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(BASE_DIR_NAME),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.portfolio-dev).
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the logs directory (~/.portfolio-dev/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the launcher log file path (~/.portfolio-dev/logs/launcher.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }
}
