//! Launcher tests.
//!
//! - `harness.rs`    - Fake spawner/handles and project fixtures
//! - `validation.rs` - Root resolution and missing-directory handling
//! - `sequencing.rs` - Staggered startup, banner timing, spawn failures
//! - `shutdown.rs`   - Interrupt handling, uncaught failures, panics
//! - `processes.rs`  - End-to-end runs with real `sh` children (Unix)

pub(crate) mod harness;
mod shutdown;
