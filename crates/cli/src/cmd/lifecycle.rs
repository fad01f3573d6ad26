//! Initialize and run flows of the `fridge` binary

use anyhow::{Context, Result};
use fridge_config::Settings;
use fridge_core::ScriptsSnapshot;
use fridge_engine::{
    CronEntry, FileStorage, Lifecycle, LifecycleOutcome, ProcessRunner, ScriptLoader,
};

use crate::command::Command;

/// Flows selected on the command line, run against validated settings
pub struct LifecycleCommand<'a> {
    /// Validated settings
    pub settings: &'a Settings,
    /// Register the cron entry and install dependencies
    pub initialize: bool,
    /// Run the backup lifecycle
    pub run: bool,
}

impl Command for LifecycleCommand<'_> {
    type Output = ();

    fn execute(&self) -> Result<()> {
        // The schedule must be valid before any script runs
        let cron = if self.initialize {
            Some(CronEntry::new(self.settings.schedule()?.clone()))
        } else {
            None
        };

        let snapshot = ScriptLoader::new(self.settings.scripts_dir())
            .load()
            .context("Failed to discover scripts")?;
        log_snapshot(&snapshot);

        let runner = ProcessRunner::new();
        let storage = FileStorage::in_temp_dir();
        let lifecycle = Lifecycle::new(&snapshot, &runner, &storage);

        if let Some(cron) = cron {
            tracing::info!("Initializing...");
            lifecycle
                .initialize(&cron, self.settings.cron_file())?
                .into_result()
                .context("Initialization failed")?;
            tracing::info!("Initialization complete.");
        }

        if self.run {
            tracing::info!("Running...");
            if let LifecycleOutcome::Recovered(message) = lifecycle.run()? {
                tracing::debug!("Recovered from: {message}");
            }
            tracing::info!("Finished running.");
        }

        Ok(())
    }
}

/// Log every discovered script, grouped by category
pub fn log_snapshot(snapshot: &ScriptsSnapshot) {
    tracing::info!("Scripts root: {}", snapshot.root().display());
    for (category, scripts) in snapshot.iter() {
        tracing::info!("{category}: {} script(s)", scripts.len());
        for script in scripts {
            tracing::info!("  {}", script.name());
        }
    }
}
