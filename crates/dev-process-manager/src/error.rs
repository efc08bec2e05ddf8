//! Error types for dev service processes.

use project_layout::ServiceRole;
use thiserror::Error;

/// Dev process error type.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The OS refused to start the process (not found, permission denied, ...).
    #[error("Failed to start {role} process `{program}`: {source}")]
    SpawnFailed {
        role: ServiceRole,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The termination request could not be delivered.
    #[error("Failed to signal {role} process: {source}")]
    Terminate {
        role: ServiceRole,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// The side the error belongs to.
    pub fn role(&self) -> ServiceRole {
        match self {
            Self::SpawnFailed { role, .. } | Self::Terminate { role, .. } => *role,
        }
    }

    /// Whether the executable could not be found at all.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SpawnFailed { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Result type for dev process operations.
pub type ProcessResult<T> = Result<T, ProcessError>;
