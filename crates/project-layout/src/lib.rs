//! Project root resolution for the portfolio dev launcher.
//!
//! The launcher may be invoked from the project root or from inside either
//! sub-project. This crate is the single place that turns the current
//! working directory into a validated [`ProjectLayout`] with both
//! sub-project paths.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default directory name of the UI sub-project.
pub const FRONTEND_DIR_NAME: &str = "frontend";
/// Default directory name of the service sub-project.
pub const BACKEND_DIR_NAME: &str = "backend";

/// The two sub-projects the launcher supervises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRole {
    Frontend,
    Backend,
}

impl ServiceRole {
    /// Both roles in startup order.
    pub const ALL: [ServiceRole; 2] = [ServiceRole::Frontend, ServiceRole::Backend];

    /// Lowercase identifier used in diagnostics and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }

    /// Capitalized name used in console labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
        }
    }
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while discovering the project layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("No {role} folder found (searched in: {})", searched.display())]
    MissingDirectory { role: ServiceRole, searched: PathBuf },
}

impl LayoutError {
    /// The path that was searched for the missing directory.
    pub fn searched_path(&self) -> &Path {
        match self {
            Self::MissingDirectory { searched, .. } => searched,
        }
    }

    /// The role whose directory is missing.
    pub fn role(&self) -> ServiceRole {
        match self {
            Self::MissingDirectory { role, .. } => *role,
        }
    }
}

/// Directory names expected under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNames {
    pub frontend: String,
    pub backend: String,
}

impl Default for LayoutNames {
    fn default() -> Self {
        Self {
            frontend: FRONTEND_DIR_NAME.to_string(),
            backend: BACKEND_DIR_NAME.to_string(),
        }
    }
}

impl LayoutNames {
    pub fn dir_name(&self, role: ServiceRole) -> &str {
        match role {
            ServiceRole::Frontend => &self.frontend,
            ServiceRole::Backend => &self.backend,
        }
    }

    fn matches(&self, name: &str) -> bool {
        name == self.frontend || name == self.backend
    }
}

/// A validated project layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// The resolved project root.
    pub root: PathBuf,
    /// `<root>/<frontend>`; guaranteed to be a directory at discovery time.
    pub frontend_dir: PathBuf,
    /// `<root>/<backend>`; guaranteed to be a directory at discovery time.
    pub backend_dir: PathBuf,
}

impl ProjectLayout {
    /// Resolve the root from `cwd` and validate both sub-project directories.
    ///
    /// The frontend directory is checked first; the first missing directory
    /// is reported.
    pub fn discover(cwd: &Path, names: &LayoutNames) -> Result<Self, LayoutError> {
        let root = resolve_project_root(cwd, names);
        Self::validate(root, names)
    }

    /// Validate an already resolved root.
    pub fn validate(root: PathBuf, names: &LayoutNames) -> Result<Self, LayoutError> {
        for role in ServiceRole::ALL {
            let dir = root.join(names.dir_name(role));
            if !dir.is_dir() {
                return Err(LayoutError::MissingDirectory {
                    role,
                    searched: dir,
                });
            }
        }

        Ok(Self {
            frontend_dir: root.join(names.dir_name(ServiceRole::Frontend)),
            backend_dir: root.join(names.dir_name(ServiceRole::Backend)),
            root,
        })
    }

    /// Working directory for a role.
    pub fn dir_for(&self, role: ServiceRole) -> &Path {
        match role {
            ServiceRole::Frontend => &self.frontend_dir,
            ServiceRole::Backend => &self.backend_dir,
        }
    }
}

/// Resolve the project root for a working directory.
///
/// If the last component of `cwd` is exactly one of the sub-project names,
/// the parent is the root. Otherwise `cwd` itself is the root.
pub fn resolve_project_root(cwd: &Path, names: &LayoutNames) -> PathBuf {
    let inside_subproject = cwd
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| names.matches(name));

    match cwd.parent() {
        Some(parent) if inside_subproject => parent.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}
