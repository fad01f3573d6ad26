//! Command execution in a sibling container
//!
//! Backup scripts often need to run a tool that only exists in the
//! application container (a database dump, for instance). This wraps
//! `kubectl exec` for the pod the sidecar runs in.

use crate::process;
use fridge_core::{Error, Result};
use std::io::Write;

/// Environment variable holding the pod name
pub const POD_NAME_VAR: &str = "POD_NAME";

/// Environment variable holding the container to exec into
pub const TARGET_CONTAINER_VAR: &str = "TARGET_CONTAINER";

/// Exec target: one container of one pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteExec {
    pod: String,
    container: String,
}

impl RemoteExec {
    /// Target `container` in `pod`
    pub fn new(pod: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            pod: pod.into(),
            container: container.into(),
        }
    }

    /// `kubectl` arguments for a command string
    ///
    /// The command is split with shell quoting rules and passed after `--`,
    /// so its own flags are not taken by kubectl.
    pub fn kubectl_args(&self, command: &str) -> Result<Vec<String>> {
        let words = shell_words::split(command)
            .map_err(|e| Error::RemoteExec(format!("Failed to parse command '{command}': {e}")))?;
        if words.is_empty() {
            return Err(Error::RemoteExec("Empty command".to_string()));
        }

        let mut args = vec![
            "exec".to_string(),
            "-i".to_string(),
            self.pod.clone(),
            "-c".to_string(),
            self.container.clone(),
            "--".to_string(),
        ];
        args.extend(words);
        Ok(args)
    }

    /// Run `command` in the target container, streaming its stdout to `out`
    ///
    /// Returns the exit code of kubectl, which is the remote command's code,
    /// or `None` when kubectl was killed by a signal.
    pub fn run<W: Write + ?Sized>(&self, command: &str, out: &mut W) -> Result<Option<i32>> {
        let kubectl = which::which("kubectl")
            .map_err(|e| Error::RemoteExec(format!("kubectl not found: {e}")))?;
        let args = self.kubectl_args(command)?;
        tracing::debug!("{} {}", kubectl.display(), shell_words::join(&args));

        let reader = process::spawn(&duct::cmd(&kubectl, &args))
            .map_err(|e| Error::RemoteExec(format!("Failed to start kubectl: {e}")))?;
        process::drain(reader, out)
            .map_err(|e| Error::RemoteExec(format!("Failed to stream kubectl output: {e}")))
    }
}
