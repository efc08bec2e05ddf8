//! The launcher context: owner of both child handles.

use crate::banner::status_banner;
use crate::error::{LauncherError, LauncherResult};
use crate::services::{remediation_hints, service_spec, tool_label};
use dev_process_manager::{LogSink, ServiceHandle, ServiceSpawner};
use launcher_config_and_utils::LauncherConfig;
use launcher_lifecycle::{LauncherPhase, PhaseTracker};
use project_layout::{ProjectLayout, ServiceRole};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Holds the frontend and backend handles for one launcher run.
///
/// At most one handle per role exists. Handles are taken out when
/// termination is requested and never reused. Dropping the context
/// requests termination of anything still held.
pub struct LauncherContext<S> {
    spawner: S,
    sink: Arc<dyn LogSink>,
    layout: ProjectLayout,
    config: LauncherConfig,
    phase: PhaseTracker,
    frontend: Option<Box<dyn ServiceHandle>>,
    backend: Option<Box<dyn ServiceHandle>>,
}

impl<S: ServiceSpawner> LauncherContext<S> {
    /// Wrap a validated layout. `phase` must be in `Validating`.
    pub fn new(
        spawner: S,
        sink: Arc<dyn LogSink>,
        layout: ProjectLayout,
        config: LauncherConfig,
        phase: PhaseTracker,
    ) -> Self {
        Self {
            spawner,
            sink,
            layout,
            config,
            phase,
            frontend: None,
            backend: None,
        }
    }

    pub fn phase(&self) -> LauncherPhase {
        self.phase.current()
    }

    /// Whether a handle for `role` is currently held.
    pub fn is_holding(&self, role: ServiceRole) -> bool {
        self.slot(role).is_some()
    }

    /// Spawn the frontend. Returns whether the process started.
    ///
    /// A spawn failure is reported to the console and does not fail the run.
    pub fn start_frontend(&mut self) -> LauncherResult<bool> {
        self.phase.advance(LauncherPhase::FrontendStarting)?;
        let started = self.start(ServiceRole::Frontend);
        self.phase.advance(LauncherPhase::BackendPending)?;
        Ok(started)
    }

    /// Spawn the backend. Independent of the frontend's outcome.
    pub fn start_backend(&mut self) -> LauncherResult<bool> {
        let started = self.start(ServiceRole::Backend);
        self.phase.advance(LauncherPhase::BothRunning)?;
        Ok(started)
    }

    /// Print the status banner.
    pub fn show_status_banner(&self) {
        for line in status_banner(&self.config.endpoints, &self.config.project_name) {
            self.sink.line(&line);
        }
        debug!(
            event_code = "launcher.banner.shown",
            "Status banner printed"
        );
    }

    /// Graceful shutdown: request termination of both children, wait
    /// `grace`, then confirm.
    pub async fn shutdown(&mut self, grace: Duration) -> LauncherResult<()> {
        self.phase.advance(LauncherPhase::ShuttingDown)?;
        info!(
            event_code = "launcher.shutdown.started",
            grace_ms = grace.as_millis() as u64,
            "Shutting down dev services"
        );
        self.sink.line("");
        self.sink.line("Stopping services...");

        self.terminate_all();
        tokio::time::sleep(grace).await;

        self.sink.line("Services stopped.");
        self.phase.advance(LauncherPhase::Terminated)?;
        info!(
            event_code = "launcher.shutdown.completed",
            phases = ?self.phase.history(),
            "Launcher stopped"
        );
        Ok(())
    }

    /// Failure path: report `err`, request termination of both children
    /// and end in `Terminated`. A no-op once the context has terminated.
    pub fn abort(&mut self, err: &LauncherError) {
        if self.phase.is_terminated() {
            debug!(error = %err, "Launcher already terminated, failure not reported");
            return;
        }
        error!(
            event_code = "launcher.failed",
            phase = %self.phase.current(),
            error = %err,
            "Launcher failed"
        );
        self.sink.error(&format!("Uncaught error: {}", err));
        self.terminate_all();

        // Best effort: a phase violation may be what brought us here.
        let _ = self.phase.advance(LauncherPhase::Failed);
        let _ = self.phase.advance(LauncherPhase::Terminated);
    }

    fn start(&mut self, role: ServiceRole) -> bool {
        let spec = service_spec(role, &self.layout, &self.config.services);

        self.sink.line("");
        self.sink
            .line(&format!("Starting {} ({})...", role.as_str(), tool_label(role)));

        match self.spawner.spawn(&spec, self.sink.clone()) {
            Ok(handle) => {
                info!(
                    event_code = "launcher.service.started",
                    role = %handle.role(),
                    pid = ?handle.pid(),
                    "Dev service started"
                );
                *self.slot_mut(role) = Some(handle);
                true
            }
            Err(err) => {
                let missing = err.is_not_found();
                warn!(
                    event_code = "launcher.service.spawn_failed",
                    role = %role,
                    program = %spec.program,
                    executable_missing = missing,
                    error = %err,
                    "Dev service failed to start"
                );
                self.sink.error("");
                self.sink
                    .error(&format!("Error starting {}: {}", role.display_name(), err));
                if missing {
                    self.sink
                        .error(&format!("`{}` was not found on PATH.", spec.program));
                }
                for hint in remediation_hints(role) {
                    self.sink.error(hint);
                }
                false
            }
        }
    }
}

impl<S> LauncherContext<S> {
    fn slot(&self, role: ServiceRole) -> &Option<Box<dyn ServiceHandle>> {
        match role {
            ServiceRole::Frontend => &self.frontend,
            ServiceRole::Backend => &self.backend,
        }
    }

    fn slot_mut(&mut self, role: ServiceRole) -> &mut Option<Box<dyn ServiceHandle>> {
        match role {
            ServiceRole::Frontend => &mut self.frontend,
            ServiceRole::Backend => &mut self.backend,
        }
    }

    /// Take every held handle and request its termination.
    fn terminate_all(&mut self) {
        for role in ServiceRole::ALL {
            let Some(mut handle) = self.slot_mut(role).take() else {
                continue;
            };
            if let Err(err) = handle.request_termination() {
                warn!(
                    event_code = "launcher.service.terminate_failed",
                    role = %handle.role(),
                    error = %err,
                    "Failed to signal dev service"
                );
            }
        }
    }
}

impl<S> Drop for LauncherContext<S> {
    fn drop(&mut self) {
        if self.frontend.is_some() || self.backend.is_some() {
            warn!(
                event_code = "launcher.context.dropped_with_children",
                "Launcher context dropped with running children, terminating"
            );
            self.terminate_all();
        }
    }
}
