//! Fridge CLI library
//!
//! This library contains the CLI logic for the fridge binaries, making it
//! reusable for testing. `fridge` itself drives the script lifecycle; the
//! helper binaries (`fridge-codegen`, `kubectlexec`, `store_var`,
//! `load_var`) each map to a module under [`cmd`].

pub mod cmd;
pub mod command;
pub mod report;

use anyhow::{Context, Result};
use clap::Parser;
use fridge_config::{CRON_SCHEDULE_VAR, DEFAULT_CRON_FILE, DEFAULT_SCRIPTS_DIR, Settings};
use std::path::{Path, PathBuf};

use cmd::lifecycle::LifecycleCommand;
use command::Command;

/// Fridge - backup script runner for sidecar containers
#[derive(Debug, Parser)]
#[command(name = "fridge")]
#[command(about = "Tool for running and initializing backup container")]
#[command(version)]
#[command(long_about = "Tool for running and initializing backup container

Scripts are read from one directory per lifecycle hook under the scripts path:
  install_dependencies  run once by --initialize, any failure is fatal
  before_backups        \\
  backups                > run in this order by --run
  after_backups         /
  on_error              run with the error message when a --run script fails")]
pub struct Cli {
    /// Configure cron and install dependencies
    #[arg(short, long)]
    pub initialize: bool,

    /// Run scripts following the lifecycle
    #[arg(short, long)]
    pub run: bool,

    /// Path to the scripts folder
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_SCRIPTS_DIR)]
    pub scripts_path: PathBuf,

    /// Path to the cron file written by --initialize
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CRON_FILE)]
    pub cron_path: PathBuf,

    /// Cron schedule of the backup run, required by --initialize
    #[arg(long, env = CRON_SCHEDULE_VAR, value_name = "EXPR")]
    pub schedule: Option<String>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "FRIDGE_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Initialize logging for a binary
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    fridge_config::logging::init(verbose, log_file).context("Failed to initialize logging")
}

/// Main entry point for the `fridge` binary
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - No flow was requested
/// - Settings are invalid (missing scripts directory, bad schedule)
/// - Initialize ends with a fatal outcome
pub fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    execute(cli)
}

/// Run the requested flows without touching the logging setup
pub fn execute(cli: &Cli) -> Result<()> {
    if !cli.initialize && !cli.run {
        anyhow::bail!("Nothing to do.\nPlease run: 'fridge --help' to see possible options");
    }

    let settings = Settings::new(&cli.scripts_path, &cli.cron_path, cli.schedule.as_deref())?;

    LifecycleCommand {
        settings: &settings,
        initialize: cli.initialize,
        run: cli.run,
    }
    .execute()
}
