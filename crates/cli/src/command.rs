//! Command trait for the fridge binaries
//!
//! Every binary parses its arguments into a struct implementing [`Command`],
//! which keeps the parsing testable apart from the process exit handling in
//! `main`.

use anyhow::Result;

/// Trait for all fridge commands
///
/// Commands can specify their return type via the `Output` associated type.
/// Most return `()`; `kubectlexec` returns the exit code to forward.
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails to execute. Error messages should
    /// be descriptive enough for the user to understand what went wrong.
    fn execute(&self) -> Result<Self::Output>;
}
