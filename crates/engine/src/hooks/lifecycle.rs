//! Lifecycle orchestration
//!
//! Sequences the hook categories for the two flows and decides what a script
//! failure means in each of them. Dependency failures during initialize are
//! fatal. Backup failures during run are handed to the `on_error` scripts and
//! do not fail the process.

use super::executor::{ExecutionResult, ScriptRunner};
use crate::cron::CronEntry;
use fridge_core::{Error, HookCategory, Result, ScratchStorage, ScriptEntry, ScriptsSnapshot};
use indexmap::IndexMap;
use std::path::Path;

/// Name of the extra argument carrying the failure message to `on_error` scripts
pub const ERROR_ARGUMENT: &str = "error";

/// How a flow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// Every script succeeded
    Success,
    /// A backup script failed and the `on_error` scripts were run
    Recovered(String),
    /// A dependency script failed; the container must not come up
    Fatal(String),
}

impl LifecycleOutcome {
    /// Check whether every script succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Turn a fatal outcome into an error, passing the others through
    pub fn into_result(self) -> Result<Self> {
        match self {
            Self::Fatal(message) => Err(Error::DependencyInstall(message)),
            outcome => Ok(outcome),
        }
    }
}

/// Result of running the scripts of one category
enum HookOutcome {
    Completed,
    Failed(String),
}

/// Drives the initialize and run flows over a scripts snapshot
pub struct Lifecycle<'a, R, S> {
    snapshot: &'a ScriptsSnapshot,
    runner: &'a R,
    storage: &'a S,
}

impl<'a, R, S> Lifecycle<'a, R, S>
where
    R: ScriptRunner,
    S: ScratchStorage,
{
    /// Create an orchestrator
    pub fn new(snapshot: &'a ScriptsSnapshot, runner: &'a R, storage: &'a S) -> Self {
        Self {
            snapshot,
            runner,
            storage,
        }
    }

    /// Register the cron entry, then install dependencies
    ///
    /// The cron file is written before any script runs. The first failing
    /// `install_dependencies` script stops the flow with a fatal outcome;
    /// `on_error` scripts are not run for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cron file cannot be written or the runner
    /// itself fails
    #[tracing::instrument(skip_all)]
    pub fn initialize(&self, cron: &CronEntry, cron_path: &Path) -> Result<LifecycleOutcome> {
        cron.write(cron_path)?;

        match self.run_hook(HookCategory::InstallDependencies)? {
            HookOutcome::Completed => Ok(LifecycleOutcome::Success),
            HookOutcome::Failed(message) => {
                tracing::error!("Dependency installation aborted: {message}");
                Ok(LifecycleOutcome::Fatal(message))
            }
        }
    }

    /// Run the backup lifecycle
    ///
    /// Scratch storage is cleared before the first script and again at the
    /// end, including when the backup sequence failed or the runner broke.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be cleared or the runner itself
    /// fails. Script failures are reported through the outcome.
    #[tracing::instrument(skip_all)]
    pub fn run(&self) -> Result<LifecycleOutcome> {
        self.storage.clear()?;

        let outcome = self.run_backups();
        let cleared = self.storage.clear();

        let outcome = outcome?;
        cleared?;
        Ok(outcome)
    }

    fn run_backups(&self) -> Result<LifecycleOutcome> {
        for category in HookCategory::BACKUP_SEQUENCE {
            if let HookOutcome::Failed(message) = self.run_hook(category)? {
                self.run_error_hooks(&message);
                tracing::error!("Script execution finished due to errors. Look at logs for details");
                return Ok(LifecycleOutcome::Recovered(message));
            }
        }

        Ok(LifecycleOutcome::Success)
    }

    /// Run a category in order, stopping at the first failure
    fn run_hook(&self, category: HookCategory) -> Result<HookOutcome> {
        tracing::info!("Hook: '{category}'");
        let no_args = IndexMap::new();

        for script in self.snapshot.scripts(category) {
            let result = self.execute(script, &no_args)?;
            if let Some(message) = result.failure_message() {
                tracing::error!("{message}");
                return Ok(HookOutcome::Failed(message));
            }
        }

        Ok(HookOutcome::Completed)
    }

    /// Run every `on_error` script with the failure message
    ///
    /// Failures here are logged and otherwise ignored; they never trigger
    /// another error branch and never stop the remaining scripts. That
    /// includes the runner itself failing on one of them.
    fn run_error_hooks(&self, message: &str) {
        tracing::info!("Hook: '{}'", HookCategory::OnError);
        let mut args = IndexMap::new();
        args.insert(ERROR_ARGUMENT.to_string(), message.to_string());

        for script in self.snapshot.scripts(HookCategory::OnError) {
            match self.execute(script, &args) {
                Ok(result) => {
                    if let Some(failure) = result.failure_message() {
                        tracing::warn!("Suppressed on_error failure: {failure}");
                    }
                }
                Err(e) => tracing::warn!("Suppressed on_error failure: {e}"),
            }
        }
    }

    fn execute(
        &self,
        script: &ScriptEntry,
        args: &IndexMap<String, String>,
    ) -> Result<ExecutionResult> {
        tracing::info!("Starting '{script}'");
        self.runner.run(script, args)
    }
}
