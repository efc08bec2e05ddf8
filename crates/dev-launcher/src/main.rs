//! Launcher binary entry point.
//!
//! Usage: portfolio-dev [--log-level <lvl>] [--log-stderr] [--base-dir <dir>] [--config <file>]

use clap::Parser;
use dev_launcher::{run_guarded, LaunchOutcome, Launcher, LauncherError};
use dev_process_manager::{ConsoleSink, LogSink, TokioSpawner};
use launcher_config_and_utils::{init_logging, LauncherConfig, LogDestination, Paths};
use project_layout::{resolve_project_root, LayoutNames};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

/// Start the portfolio frontend and backend dev servers together.
#[derive(Parser, Debug)]
#[command(name = "portfolio-dev")]
#[command(about = "Start the portfolio frontend and backend dev servers together")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(short, long)]
    log_level: Option<String>,

    /// Mirror diagnostics to stderr in addition to the log file
    #[arg(long)]
    log_stderr: bool,

    /// Base directory for runtime files (logs). Defaults to ~/.portfolio-dev
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Config file. Defaults to dev-launcher.json at the project root, if present
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let sink: Arc<dyn LogSink> = Arc::new(ConsoleSink);

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            sink.error(&format!("Cannot read the current directory: {}", err));
            return ExitCode::from(LaunchOutcome::Failed.exit_code());
        }
    };

    // The config file lives at the root, so it is located with the default
    // directory names; the loaded names then drive validation.
    let root = resolve_project_root(&cwd, &LayoutNames::default());
    let mut config = match LauncherConfig::load(cli.config.as_deref(), &root) {
        Ok(config) => config,
        Err(err) => {
            sink.error(&LauncherError::from(err).to_string());
            return ExitCode::from(LaunchOutcome::ConfigFailed.exit_code());
        }
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let (paths, paths_error) = match cli.base_dir {
        Some(base) => (Paths::with_base_dir(base), None),
        None => match Paths::new() {
            Ok(paths) => (paths, None),
            Err(err) => (
                Paths::with_base_dir(std::env::temp_dir().join("portfolio-dev")),
                Some(err),
            ),
        },
    };

    let destination = init_logging(&paths.log_file(), &config.log_level, cli.log_stderr);
    if let Some(err) = paths_error {
        warn!(
            error = %err,
            base_dir = %paths.base_dir().display(),
            "Home directory unavailable, using temp dir"
        );
    }
    info!(
        event_code = "launcher.starting",
        cwd = %cwd.display(),
        log_file = ?match &destination {
            LogDestination::File(path) => Some(path.display().to_string()),
            LogDestination::StderrFallback => None,
        },
        "Launcher starting"
    );

    let launcher = Launcher::new(TokioSpawner, sink, config);
    let outcome = run_guarded(launcher, cwd, tokio::signal::ctrl_c()).await;

    info!(event_code = "launcher.exiting", outcome = ?outcome, "Launcher exiting");
    ExitCode::from(outcome.exit_code())
}
