//! Base error types for fridge
//!
//! Every library crate reports failures through this enum. Recoverable
//! backup failures are not errors: they are carried by the lifecycle outcome
//! so the run flow can finish its cleanup.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// A path that must be a directory is missing or is something else
    #[error("The following path '{}' is not a valid directory", path.display())]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// A required environment value was not provided
    #[error("Could not find '{0}' in the environment variables")]
    MissingVariable(&'static str),

    /// Cron schedule failed validation
    #[error("Provided cron schedule '{schedule}' is not valid: {reason}")]
    InvalidSchedule {
        /// Expression as provided
        schedule: String,
        /// Parser message
        reason: String,
    },

    /// Error reading a directory
    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        /// Directory being listed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Error reading a file
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        /// File being written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Unknown hook directory name
    #[error("Unknown hook category: {0}")]
    UnknownHookCategory(String),

    /// Malformed cron file content
    #[error("Invalid cron entry: {0}")]
    CronEntry(String),

    /// The runner itself failed (not a script exiting non-zero)
    #[error("Hook execution error: {0}")]
    HookExecution(String),

    /// A dependency installation script failed during initialize
    #[error("Dependency installation failed: {0}")]
    DependencyInstall(String),

    /// Scratch storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Logging could not be initialized
    #[error("Logging initialization failed: {0}")]
    Logging(String),

    /// Remote exec into a sibling container could not be prepared or started
    #[error("Remote execution error: {0}")]
    RemoteExec(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
