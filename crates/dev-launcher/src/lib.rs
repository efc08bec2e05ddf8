//! Portfolio dev launcher.
//!
//! Starts the frontend dev server and the backend service side by side from
//! the project root (or from inside either sub-project), multiplexes their
//! output onto one console and stops both on Ctrl+C.
//!
//! # Sequencing
//!
//! ```text
//! t0          spawn frontend
//! t0 + 2000ms spawn backend        (regardless of the frontend outcome)
//! t0 + 3000ms print status banner  (regardless of either outcome)
//! Ctrl+C      request termination of both, wait 500ms, exit 0
//! ```
//!
//! All delays come from [`launcher_config_and_utils::Timings`].

pub mod banner;
pub mod context;
pub mod error;
pub mod launcher;
pub mod services;

#[cfg(test)]
mod tests;

pub use context::LauncherContext;
pub use error::{LauncherError, LauncherResult};
pub use launcher::{run_guarded, LaunchOutcome, Launcher};
