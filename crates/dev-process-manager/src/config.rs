//! Configuration for dev service processes.

use project_layout::ServiceRole;
use std::path::PathBuf;

/// Platform package-script runner used for the frontend.
pub const PACKAGE_RUNNER: &str = if cfg!(windows) { "npm.cmd" } else { "npm" };

/// Platform script interpreter used for the backend.
pub const INTERPRETER: &str = if cfg!(windows) { "python" } else { "python3" };

/// Default frontend arguments (`npm run dev`).
pub const FRONTEND_ARGS: [&str; 2] = ["run", "dev"];

/// Default backend entry script.
pub const BACKEND_ENTRY: &str = "app.py";

/// Configuration for spawning one dev service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Which side this process is.
    pub role: ServiceRole,

    /// Executable to run, resolved through `PATH`.
    pub program: String,

    /// Arguments passed to the executable.
    pub args: Vec<String>,

    /// Working directory of the process.
    pub working_dir: PathBuf,

    /// Extra environment variables on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl ServiceSpec {
    /// Create a spec for an arbitrary command.
    pub fn new(
        role: ServiceRole,
        program: impl Into<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            role,
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            env: Vec::new(),
        }
    }

    /// The frontend dev server: `npm run dev`.
    pub fn frontend(working_dir: impl Into<PathBuf>) -> Self {
        Self::new(ServiceRole::Frontend, PACKAGE_RUNNER, working_dir).with_args(FRONTEND_ARGS)
    }

    /// The backend service: `python3 app.py` with unbuffered output.
    pub fn backend(working_dir: impl Into<PathBuf>) -> Self {
        Self::new(ServiceRole::Backend, INTERPRETER, working_dir)
            .with_args([BACKEND_ENTRY])
            .with_env("PYTHONUNBUFFERED", "1")
    }

    /// Default spec for a role.
    pub fn for_role(role: ServiceRole, working_dir: impl Into<PathBuf>) -> Self {
        match role {
            ServiceRole::Frontend => Self::frontend(working_dir),
            ServiceRole::Backend => Self::backend(working_dir),
        }
    }

    /// Replace the executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace the argument list.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Human-readable command line, for diagnostics.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
