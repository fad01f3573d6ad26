//! Script execution
//!
//! Runs one script as a child process and reports how it ended. Deciding what
//! a failure means is left to the lifecycle.

use crate::process;
use fridge_core::{Error, Result, ScriptEntry};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Stdout, Write};

/// How a script run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    /// The process exited with a code
    Exited(i32),
    /// The process was terminated by a signal
    Terminated,
    /// The process could not be started
    FailedToStart(String),
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit code '{code}'"),
            Self::Terminated => f.write_str("terminated by a signal"),
            Self::FailedToStart(reason) => write!(f, "failed to start: {reason}"),
        }
    }
}

/// Outcome of running one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    script: ScriptEntry,
    status: ScriptStatus,
}

impl ExecutionResult {
    /// Pair a script with how it ended
    #[must_use]
    pub fn new(script: ScriptEntry, status: ScriptStatus) -> Self {
        Self { script, status }
    }

    /// The script that ran
    #[must_use]
    pub fn script(&self) -> &ScriptEntry {
        &self.script
    }

    /// How it ended
    #[must_use]
    pub fn status(&self) -> &ScriptStatus {
        &self.status
    }

    /// Only a zero exit code counts as success
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == ScriptStatus::Exited(0)
    }

    /// Message describing the failure, `None` on success
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        match &self.status {
            ScriptStatus::Exited(0) => None,
            ScriptStatus::Exited(_) => Some(format!(
                "Script '{}' finished with {}",
                self.script, self.status
            )),
            status => Some(format!("Script '{}' {status}", self.script)),
        }
    }
}

/// Something that can run a script to completion
///
/// The lifecycle only talks to this trait, which keeps its control flow
/// testable without spawning processes.
pub trait ScriptRunner {
    /// Run a script, appending `args` values as positional arguments in
    /// insertion order, and block until it ends
    ///
    /// A script exiting non-zero is a normal result, not an error. Errors are
    /// reserved for the runner itself breaking.
    fn run(&self, script: &ScriptEntry, args: &IndexMap<String, String>)
    -> Result<ExecutionResult>;
}

/// Full command line for a script invocation
#[must_use]
pub fn command_line(script: &ScriptEntry, args: &IndexMap<String, String>) -> Vec<String> {
    std::iter::once(script.path().to_string_lossy().into_owned())
        .chain(args.values().cloned())
        .collect()
}

/// Runs scripts as child processes, streaming their stdout to a writer
///
/// Defaults to the process stdout.
pub struct ProcessRunner<W: Write = Stdout> {
    output: RefCell<W>,
}

impl ProcessRunner<Stdout> {
    /// Runner that streams to stdout
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ProcessRunner<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ProcessRunner<W> {
    /// Runner that streams to the given writer
    pub fn with_writer(writer: W) -> Self {
        Self {
            output: RefCell::new(writer),
        }
    }

    /// Take back the writer
    pub fn into_writer(self) -> W {
        self.output.into_inner()
    }
}

impl<W: Write> ScriptRunner for ProcessRunner<W> {
    #[tracing::instrument(skip_all, fields(script = %script.name(), hook = %script.category()))]
    fn run(
        &self,
        script: &ScriptEntry,
        args: &IndexMap<String, String>,
    ) -> Result<ExecutionResult> {
        tracing::info!("{:?}", command_line(script, args));

        let expression = duct::cmd(script.path(), args.values());
        let reader = match process::spawn(&expression) {
            Ok(reader) => reader,
            Err(e) => {
                return Ok(ExecutionResult::new(
                    script.clone(),
                    ScriptStatus::FailedToStart(e.to_string()),
                ));
            }
        };

        let mut output = self.output.borrow_mut();
        let code = process::drain(reader, &mut *output).map_err(|e| {
            Error::HookExecution(format!("Failed to stream output of '{script}': {e}"))
        })?;

        let status = code.map_or(ScriptStatus::Terminated, ScriptStatus::Exited);
        tracing::debug!(%status, "Script finished");

        Ok(ExecutionResult::new(script.clone(), status))
    }
}
