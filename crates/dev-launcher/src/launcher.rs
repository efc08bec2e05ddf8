//! Launcher run loop: validation, staggered startup, shutdown.

use crate::banner::startup_header;
use crate::context::LauncherContext;
use crate::error::{LauncherError, LauncherResult};
use crate::services::layout_names;
use dev_process_manager::{LogSink, ServiceSpawner};
use launcher_config_and_utils::{LauncherConfig, Timings};
use launcher_lifecycle::{LauncherPhase, PhaseTracker, ShutdownSignal};
use project_layout::{LayoutError, ProjectLayout};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info};

/// How a launcher run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Interrupt-triggered shutdown completed.
    Stopped,
    /// A sub-project directory was missing; nothing was spawned.
    ValidationFailed,
    /// Configuration could not be loaded; nothing was spawned.
    ConfigFailed,
    /// Uncaught failure; both children were asked to terminate.
    Failed,
}

impl LaunchOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Stopped => 0,
            Self::ValidationFailed | Self::ConfigFailed | Self::Failed => 1,
        }
    }
}

/// Starts and supervises the two dev services.
pub struct Launcher<S> {
    spawner: S,
    sink: Arc<dyn LogSink>,
    config: LauncherConfig,
    shutdown: ShutdownSignal,
}

impl<S: ServiceSpawner> Launcher<S> {
    pub fn new(spawner: S, sink: Arc<dyn LogSink>, config: LauncherConfig) -> Self {
        Self {
            spawner,
            sink,
            config,
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Token that stops the run when triggered, like an interrupt would.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Run from `cwd` until shut down.
    ///
    /// `interrupt` resolves on the first Ctrl+C; an `Err` means the handler
    /// could not be installed, which fails the run.
    pub async fn run<F>(self, cwd: &Path, interrupt: F) -> LaunchOutcome
    where
        F: Future<Output = std::io::Result<()>>,
    {
        let mut phase = PhaseTracker::new();
        if let Err(err) = phase.advance(LauncherPhase::Validating) {
            error!(error = %err, "Launcher could not begin validation");
            return LaunchOutcome::Failed;
        }

        let names = layout_names(&self.config.directories);
        let layout = match ProjectLayout::discover(cwd, &names) {
            Ok(layout) => layout,
            Err(err) => {
                self.report_missing_directory(&err);
                let _ = phase.advance(LauncherPhase::Failed);
                let _ = phase.advance(LauncherPhase::Terminated);
                return LaunchOutcome::ValidationFailed;
            }
        };

        info!(
            event_code = "launcher.layout.resolved",
            root = %layout.root.display(),
            frontend = %layout.frontend_dir.display(),
            backend = %layout.backend_dir.display(),
            "Project layout resolved"
        );
        for line in startup_header(&layout) {
            self.sink.line(&line);
        }

        let timings = self.config.timings.clone();
        let shutdown = self.shutdown.clone();
        let mut ctx = LauncherContext::new(self.spawner, self.sink, layout, self.config, phase);

        match drive(&mut ctx, &timings, &shutdown, interrupt).await {
            Ok(()) => LaunchOutcome::Stopped,
            Err(err) => {
                ctx.abort(&err);
                LaunchOutcome::Failed
            }
        }
    }

    fn report_missing_directory(&self, err: &LayoutError) {
        error!(
            event_code = "launcher.layout.missing_directory",
            role = %err.role(),
            searched = %err.searched_path().display(),
            "Required sub-project directory missing"
        );
        self.sink.error(&err.to_string());
    }
}

/// Staggered startup followed by waiting for shutdown.
///
/// Times are measured from the moment the frontend spawn returns. The
/// backend and the banner fire on schedule regardless of earlier spawn
/// outcomes. An interrupt pre-empts a timer due at the same instant.
async fn drive<S, F>(
    ctx: &mut LauncherContext<S>,
    timings: &Timings,
    shutdown: &ShutdownSignal,
    interrupt: F,
) -> LauncherResult<()>
where
    S: ServiceSpawner,
    F: Future<Output = std::io::Result<()>>,
{
    ctx.start_frontend()?;
    let t0 = Instant::now();

    let backend_at = t0 + timings.backend_delay();
    let banner_at = t0 + timings.banner_delay();
    let mut backend_started = false;
    let mut banner_shown = false;
    let mut interrupt_seen = false;

    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            biased;

            result = &mut interrupt, if !interrupt_seen => {
                interrupt_seen = true;
                result.map_err(LauncherError::Signal)?;
                info!(
                    event_code = "launcher.interrupt.received",
                    "Interrupt received"
                );
                if !shutdown.trigger() {
                    debug!("Shutdown already in progress, interrupt ignored");
                }
            }
            _ = shutdown.wait() => break,
            _ = sleep_until(backend_at), if !backend_started => {
                backend_started = true;
                ctx.start_backend()?;
            }
            _ = sleep_until(banner_at), if !banner_shown => {
                banner_shown = true;
                ctx.show_status_banner();
            }
        }
    }

    ctx.shutdown(timings.shutdown_grace()).await
}

/// Run `launcher` on its own task so a panic still ends in a clean
/// [`LaunchOutcome::Failed`]. Children held at the time of the panic are
/// terminated when the context is dropped.
pub async fn run_guarded<S, F>(launcher: Launcher<S>, cwd: PathBuf, interrupt: F) -> LaunchOutcome
where
    S: ServiceSpawner + Send + 'static,
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let sink = launcher.sink.clone();
    let task = tokio::spawn(async move { launcher.run(&cwd, interrupt).await });

    match task.await {
        Ok(outcome) => outcome,
        Err(join_err) => {
            let err = LauncherError::Panicked(join_err.to_string());
            error!(
                event_code = "launcher.panicked",
                error = %err,
                "Launcher task panicked"
            );
            sink.error(&format!("Uncaught error: {}", err));
            LaunchOutcome::Failed
        }
    }
}
