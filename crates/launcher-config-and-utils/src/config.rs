//! Configuration management for the launcher.

use crate::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Name of the optional config file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "dev-launcher.json";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Project name shown in the status banner.
pub const DEFAULT_PROJECT_NAME: &str = "Portafolio Cristian Durán";

/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "PORTFOLIO_DEV_LOG_LEVEL";

/// Startup and shutdown delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Delay between the frontend spawn and the backend spawn.
    pub backend_delay_ms: u64,
    /// Delay between the frontend spawn and the status banner.
    pub banner_delay_ms: u64,
    /// Pause between termination requests and exit.
    pub shutdown_grace_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            backend_delay_ms: 2_000,
            banner_delay_ms: 3_000,
            shutdown_grace_ms: 500,
        }
    }
}

impl Timings {
    pub fn backend_delay(&self) -> Duration {
        Duration::from_millis(self.backend_delay_ms)
    }

    pub fn banner_delay(&self) -> Duration {
        Duration::from_millis(self.banner_delay_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

/// Replacement command for one service. Unset fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommandOverride {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceOverrides {
    pub frontend: CommandOverride,
    pub backend: CommandOverride,
}

/// Sub-project directory names under the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Directories {
    pub frontend: String,
    pub backend: String,
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            frontend: "frontend".to_string(),
            backend: "backend".to_string(),
        }
    }
}

/// URLs listed in the status banner. Informational only, never probed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub frontend: String,
    pub backend: String,
    pub docs: String,
    pub health: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            frontend: "http://localhost:3000".to_string(),
            backend: "http://localhost:5000".to_string(),
            docs: "http://localhost:5000/api/v1/docs".to_string(),
            health: "http://localhost:5000/api/v1/health".to_string(),
        }
    }
}

/// Main launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Name printed in the status banner.
    pub project_name: String,
    pub timings: Timings,
    pub directories: Directories,
    pub services: ServiceOverrides,
    pub endpoints: Endpoints,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            timings: Timings::default(),
            directories: Directories::default(),
            services: ServiceOverrides::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl LauncherConfig {
    /// Load the launcher configuration.
    ///
    /// An `explicit` path must exist. Otherwise `<root>/dev-launcher.json` is
    /// used when present, falling back to defaults. The environment is
    /// applied last.
    pub fn load(explicit: Option<&Path>, root: &Path) -> CoreResult<Self> {
        let mut config = match explicit {
            Some(path) if !path.is_file() => {
                return Err(CoreError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => Self::load_from_file(path)?,
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::load_from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file. Unknown fields are ignored.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LauncherConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from the environment. Only `log_level` is overridable.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }

    /// Reject values the launcher cannot act on.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [
            ("directories.frontend", &self.directories.frontend),
            ("directories.backend", &self.directories.backend),
        ] {
            if value.trim().is_empty() || value.contains(['/', '\\']) {
                return Err(CoreError::Config(format!(
                    "{} must be a plain directory name, got {:?}",
                    name, value
                )));
            }
        }
        if self.directories.frontend == self.directories.backend {
            return Err(CoreError::Config(
                "frontend and backend directories must differ".to_string(),
            ));
        }

        for (name, service) in [
            ("frontend", &self.services.frontend),
            ("backend", &self.services.backend),
        ] {
            if service
                .program
                .as_deref()
                .is_some_and(|program| program.trim().is_empty())
            {
                return Err(CoreError::Config(format!(
                    "services.{}.program must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}
