//! Dev service process management for the portfolio launcher.
//!
//! This crate spawns the frontend dev server and the backend service as
//! child processes and multiplexes their output onto one console, each
//! line tagged with a colored per-source prefix.
//!
//! # Example
//!
//! ```ignore
//! use dev_process_manager::{ConsoleSink, ServiceSpec, ServiceSpawner, TokioSpawner};
//! use std::sync::Arc;
//!
//! let spec = ServiceSpec::frontend("/home/me/portfolio/frontend");
//! let mut handle = TokioSpawner.spawn(&spec, Arc::new(ConsoleSink))?;
//!
//! // Later
//! handle.request_termination()?;
//! ```

mod config;
mod error;
mod line;
mod process;
mod sink;
mod stream;

pub use config::{ServiceSpec, BACKEND_ENTRY, FRONTEND_ARGS, INTERPRETER, PACKAGE_RUNNER};
pub use error::{ProcessError, ProcessResult};
pub use line::{LogLine, OutputStyle, ANSI_CYAN, ANSI_RESET, ANSI_YELLOW};
pub use process::{DevProcess, ServiceHandle, ServiceSpawner, TokioSpawner};
pub use sink::{BufferSink, ConsoleSink, ConsoleStream, LogSink};
pub use stream::{attach_output_streams, pump_lines, StreamTask};

pub use project_layout::ServiceRole;
