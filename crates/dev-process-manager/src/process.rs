//! Dev service process management.

use crate::config::ServiceSpec;
use crate::error::{ProcessError, ProcessResult};
use crate::sink::LogSink;
use crate::stream::{attach_output_streams, StreamTask};
use project_layout::ServiceRole;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// A running child the launcher can ask to stop.
pub trait ServiceHandle: Send {
    /// Which side this process is.
    fn role(&self) -> ServiceRole;

    /// OS process id, if the process has not been reaped yet.
    fn pid(&self) -> Option<u32>;

    /// Ask the process to terminate. Does not wait and does not escalate.
    fn request_termination(&mut self) -> ProcessResult<()>;
}

/// Starts dev services.
pub trait ServiceSpawner {
    /// Spawn `spec`, forwarding its output lines to `sink`.
    ///
    /// Must be called from within a tokio runtime.
    fn spawn(
        &self,
        spec: &ServiceSpec,
        sink: Arc<dyn LogSink>,
    ) -> ProcessResult<Box<dyn ServiceHandle>>;
}

/// Spawns real OS processes with `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSpawner;

impl ServiceSpawner for TokioSpawner {
    fn spawn(
        &self,
        spec: &ServiceSpec,
        sink: Arc<dyn LogSink>,
    ) -> ProcessResult<Box<dyn ServiceHandle>> {
        Ok(Box::new(DevProcess::spawn(spec, sink)?))
    }
}

/// A handle to a running dev service.
pub struct DevProcess {
    role: ServiceRole,
    child: Child,
    streams: Vec<StreamTask>,
}

impl DevProcess {
    /// Spawn the process described by `spec` with piped output.
    ///
    /// The executable is resolved through `PATH`; no shell is involved.
    pub fn spawn(spec: &ServiceSpec, sink: Arc<dyn LogSink>) -> ProcessResult<Self> {
        info!(
            event_code = "launcher.child.spawning",
            role = %spec.role,
            program = %spec.program,
            working_dir = %spec.working_dir.display(),
            "Spawning dev service"
        );
        debug!(role = %spec.role, command = %spec.command_line(), "Dev service command");

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                role: spec.role,
                program: spec.program.clone(),
                source,
            })?;

        info!(
            event_code = "launcher.child.spawned",
            role = %spec.role,
            pid = ?child.id(),
            "Dev service spawned"
        );

        let streams = attach_output_streams(&mut child, spec.role, sink);

        Ok(Self {
            role: spec.role,
            child,
            streams,
        })
    }

    /// Wait for the process to exit and its output to be fully forwarded.
    pub async fn wait(mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait().await?;
        for task in self.streams.drain(..) {
            let _ = task.await;
        }
        Ok(status)
    }
}

impl ServiceHandle for DevProcess {
    fn role(&self) -> ServiceRole {
        self.role
    }

    fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    #[cfg(unix)]
    fn request_termination(&mut self) -> ProcessResult<()> {
        let Some(pid) = self.child.id() else {
            debug!(role = %self.role, "Dev service already reaped, nothing to signal");
            return Ok(());
        };

        info!(
            event_code = "launcher.child.terminate_requested",
            role = %self.role,
            pid = pid,
            "Sending SIGTERM to dev service"
        );
        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if rc != 0 {
            return Err(ProcessError::Terminate {
                role: self.role,
                source: std::io::Error::last_os_error(),
            });
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn request_termination(&mut self) -> ProcessResult<()> {
        info!(
            event_code = "launcher.child.terminate_requested",
            role = %self.role,
            pid = ?self.child.id(),
            "Terminating dev service"
        );
        self.child
            .start_kill()
            .map_err(|source| ProcessError::Terminate {
                role: self.role,
                source,
            })
    }
}

impl std::fmt::Debug for DevProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevProcess")
            .field("role", &self.role)
            .field("pid", &self.child.id())
            .field("streams", &self.streams.len())
            .finish_non_exhaustive()
    }
}
