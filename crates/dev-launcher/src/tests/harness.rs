//! Test harness for launcher tests.
//!
//! Provides:
//! - FakeSpawner: records every spawn with its completion time and can be
//!   told to fail, panic or block for a while
//! - FakeHandle: counts termination requests instead of signaling anything
//! - Project fixtures on a temp dir

use crate::launcher::Launcher;
use dev_process_manager::{
    BufferSink, LogSink, ProcessError, ProcessResult, ServiceHandle, ServiceSpawner, ServiceSpec,
};
use launcher_config_and_utils::LauncherConfig;
use parking_lot::Mutex;
use project_layout::ServiceRole;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

/// One recorded spawn attempt.
#[derive(Debug, Clone)]
pub struct SpawnRecord {
    pub role: ServiceRole,
    pub program: String,
    pub working_dir: PathBuf,
    /// When the spawn call returned.
    pub at: Instant,
    pub succeeded: bool,
}

#[derive(Default)]
struct FakeState {
    spawns: Mutex<Vec<SpawnRecord>>,
    terminations: Mutex<Vec<ServiceRole>>,
    failing: Mutex<HashSet<ServiceRole>>,
    panicking: Mutex<HashSet<ServiceRole>>,
    spawn_costs: Mutex<HashMap<ServiceRole, Duration>>,
}

/// Spawner that never starts a real process.
#[derive(Clone, Default)]
pub struct FakeSpawner {
    state: Arc<FakeState>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make spawns for `role` fail as if the executable were missing.
    pub fn fail(&self, role: ServiceRole) -> &Self {
        self.state.failing.lock().insert(role);
        self
    }

    /// Make spawns for `role` panic.
    pub fn panic_on(&self, role: ServiceRole) -> &Self {
        self.state.panicking.lock().insert(role);
        self
    }

    /// Block the calling thread for `cost` when spawning `role`, like a slow
    /// `fork`/`exec`. Only meaningful on the real clock.
    pub fn spawn_cost(&self, role: ServiceRole, cost: Duration) -> &Self {
        self.state.spawn_costs.lock().insert(role, cost);
        self
    }

    pub fn spawns(&self) -> Vec<SpawnRecord> {
        self.state.spawns.lock().clone()
    }

    pub fn spawn_of(&self, role: ServiceRole) -> Option<SpawnRecord> {
        self.spawns().into_iter().find(|record| record.role == role)
    }

    pub fn spawned_roles(&self) -> Vec<ServiceRole> {
        self.spawns().iter().map(|record| record.role).collect()
    }

    pub fn terminations(&self) -> Vec<ServiceRole> {
        self.state.terminations.lock().clone()
    }

    pub fn termination_count(&self, role: ServiceRole) -> usize {
        self.terminations().iter().filter(|r| **r == role).count()
    }
}

impl ServiceSpawner for FakeSpawner {
    fn spawn(
        &self,
        spec: &ServiceSpec,
        sink: Arc<dyn LogSink>,
    ) -> ProcessResult<Box<dyn ServiceHandle>> {
        let cost = self.state.spawn_costs.lock().get(&spec.role).copied();
        if let Some(cost) = cost {
            std::thread::sleep(cost);
        }

        let fails = self.state.failing.lock().contains(&spec.role);
        self.state.spawns.lock().push(SpawnRecord {
            role: spec.role,
            program: spec.program.clone(),
            working_dir: spec.working_dir.clone(),
            at: Instant::now(),
            succeeded: !fails,
        });

        if self.state.panicking.lock().contains(&spec.role) {
            panic!("fake spawner told to panic for {}", spec.role);
        }

        if fails {
            return Err(ProcessError::SpawnFailed {
                role: spec.role,
                program: spec.program.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            });
        }

        sink.line(&format!("fake {} output", spec.role));
        Ok(Box::new(FakeHandle {
            role: spec.role,
            state: self.state.clone(),
        }))
    }
}

/// Handle that records termination requests.
pub struct FakeHandle {
    role: ServiceRole,
    state: Arc<FakeState>,
}

impl ServiceHandle for FakeHandle {
    fn role(&self) -> ServiceRole {
        self.role
    }

    fn pid(&self) -> Option<u32> {
        Some(match self.role {
            ServiceRole::Frontend => 1001,
            ServiceRole::Backend => 1002,
        })
    }

    fn request_termination(&mut self) -> ProcessResult<()> {
        self.state.terminations.lock().push(self.role);
        Ok(())
    }
}

/// Temp project root containing the given sub-directories.
pub fn project_with(dirs: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in dirs {
        std::fs::create_dir_all(dir.path().join(name)).unwrap();
    }
    dir
}

/// Temp project root with both default sub-projects.
pub fn full_project() -> TempDir {
    project_with(&["frontend", "backend"])
}

/// Launcher wired to fakes with default configuration.
pub fn launcher(spawner: &FakeSpawner, sink: &BufferSink) -> Launcher<FakeSpawner> {
    launcher_with_config(spawner, sink, LauncherConfig::default())
}

pub fn launcher_with_config(
    spawner: &FakeSpawner,
    sink: &BufferSink,
    config: LauncherConfig,
) -> Launcher<FakeSpawner> {
    Launcher::new(spawner.clone(), Arc::new(sink.clone()), config)
}

/// An interrupt that fires `ms` after the run starts.
pub fn interrupt_after(ms: u64) -> impl Future<Output = std::io::Result<()>> + Send + 'static {
    async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}

/// An interrupt that never fires.
pub fn no_interrupt() -> impl Future<Output = std::io::Result<()>> + Send + 'static {
    std::future::pending()
}

/// An interrupt handler that cannot be installed.
pub fn broken_interrupt() -> impl Future<Output = std::io::Result<()>> + Send + 'static {
    async {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "signal driver unavailable",
        ))
    }
}

/// Milliseconds between two instants.
pub fn millis_between(earlier: Instant, later: Instant) -> u128 {
    later.duration_since(earlier).as_millis()
}
