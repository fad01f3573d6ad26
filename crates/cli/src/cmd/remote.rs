//! `kubectlexec`: run a command in the application container

use anyhow::{Context, Result};
use clap::Parser;
use fridge_core::Error;
use fridge_engine::remote::{POD_NAME_VAR, RemoteExec, TARGET_CONTAINER_VAR};

use crate::command::Command;

/// Run a command in another container of this pod
#[derive(Debug, Parser)]
#[command(name = "kubectlexec", version)]
pub struct RemoteCommand {
    /// Pod to exec into
    #[arg(long, env = POD_NAME_VAR, value_name = "POD")]
    pub pod: Option<String>,

    /// Container to exec into
    #[arg(long, env = TARGET_CONTAINER_VAR, value_name = "CONTAINER")]
    pub container: Option<String>,

    /// Command line to run, split with shell quoting rules
    pub command: String,
}

impl RemoteCommand {
    /// Exec target from flags or environment
    pub fn target(&self) -> Result<RemoteExec> {
        let pod = self
            .pod
            .as_deref()
            .ok_or(Error::MissingVariable(POD_NAME_VAR))?;
        let container = self
            .container
            .as_deref()
            .ok_or(Error::MissingVariable(TARGET_CONTAINER_VAR))?;
        Ok(RemoteExec::new(pod, container))
    }
}

impl Command for RemoteCommand {
    /// Exit code of the remote command
    type Output = i32;

    fn execute(&self) -> Result<i32> {
        let target = self.target()?;
        let mut stdout = std::io::stdout().lock();

        target
            .run(&self.command, &mut stdout)
            .with_context(|| format!("Failed to run '{}'", self.command))?
            .context("kubectl was terminated by a signal")
    }
}
