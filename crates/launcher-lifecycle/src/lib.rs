//! Launcher lifecycle management for the portfolio dev launcher.
//!
//! Tracks the launcher's phase and provides the single cancellation token
//! that drives graceful shutdown.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Errors from lifecycle management.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Invalid launcher phase transition: {from} -> {to}")]
    InvalidTransition {
        from: LauncherPhase,
        to: LauncherPhase,
    },
}

/// Where the launcher is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LauncherPhase {
    Idle,
    Validating,
    FrontendStarting,
    BackendPending,
    BothRunning,
    ShuttingDown,
    Failed,
    Terminated,
}

impl LauncherPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::FrontendStarting => "frontend_starting",
            Self::BackendPending => "backend_pending",
            Self::BothRunning => "both_running",
            Self::ShuttingDown => "shutting_down",
            Self::Failed => "failed",
            Self::Terminated => "terminated",
        }
    }

    /// Whether at least one child may have been spawned in this phase.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            Self::FrontendStarting | Self::BackendPending | Self::BothRunning
        )
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_advance_to(&self, next: LauncherPhase) -> bool {
        use LauncherPhase::*;
        match (*self, next) {
            (Idle, Validating) => true,
            (Validating, FrontendStarting) => true,
            (FrontendStarting, BackendPending) => true,
            (BackendPending, BothRunning) => true,
            (FrontendStarting | BackendPending | BothRunning, ShuttingDown) => true,
            (ShuttingDown, Terminated) => true,
            (Idle | Validating | ShuttingDown, Failed) => true,
            (phase, Failed) if phase.is_running() => true,
            (Failed, Terminated) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LauncherPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enforces the launcher's phase order.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    current: LauncherPhase,
    history: Vec<LauncherPhase>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTracker {
    /// Start in [`LauncherPhase::Idle`].
    pub fn new() -> Self {
        Self {
            current: LauncherPhase::Idle,
            history: vec![LauncherPhase::Idle],
        }
    }

    pub fn current(&self) -> LauncherPhase {
        self.current
    }

    /// Every phase visited so far, oldest first.
    pub fn history(&self) -> &[LauncherPhase] {
        &self.history
    }

    /// Move to `next`, returning the phase that was left.
    pub fn advance(&mut self, next: LauncherPhase) -> Result<LauncherPhase, LifecycleError> {
        let from = self.current;
        if !from.can_advance_to(next) {
            return Err(LifecycleError::InvalidTransition { from, to: next });
        }
        debug!(
            event_code = "launcher.phase.changed",
            from = %from,
            to = %next,
            "Launcher phase changed"
        );
        self.current = next;
        self.history.push(next);
        Ok(from)
    }

    /// Whether the launcher has reached its final phase.
    pub fn is_terminated(&self) -> bool {
        self.current == LauncherPhase::Terminated
    }
}

/// Cloneable, one-shot cancellation token.
///
/// Every clone observes the same state. Only the first [`trigger`] has an
/// effect.
///
/// [`trigger`]: ShutdownSignal::trigger
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Returns `true` only for the call that flipped the
    /// signal; later calls are no-ops returning `false`.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|triggered| {
            if *triggered {
                false
            } else {
                *triggered = true;
                true
            }
        })
    }

    #[cfg(test)]
    fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the signal has been triggered.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender is owned by `self`, so the channel cannot close here.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}
