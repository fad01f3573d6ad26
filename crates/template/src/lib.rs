//! # Fridge Template
//!
//! Kubernetes manifest generation for fridge using minijinja.
//!
//! Given a scripts directory laid out by hook category, this crate renders
//! the ConfigMaps holding the scripts, the volume and mount fragments to paste
//! into a pod spec, and the service account the sidecar runs as.

pub mod context;
pub mod engine;
pub mod templates;

pub use context::{HookScripts, ManifestContext, ScriptSource};
pub use engine::ManifestEngine;

use std::path::PathBuf;
use thiserror::Error;

/// Result type for manifest generation
pub type Result<T> = std::result::Result<T, Error>;

/// Manifest generation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Template rendering error
    #[error("Template error at {location}: {message}")]
    Render { location: String, message: String },

    /// A script could not be read
    #[error("Failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest could not be written
    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output location is not a directory
    #[error("The following path '{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        let location = match (err.name(), err.line()) {
            (Some(name), Some(line)) => format!("{name} line {line}"),
            (Some(name), None) => name.to_string(),
            (None, Some(line)) => format!("line {line}"),
            (None, None) => "unknown location".to_string(),
        };

        Error::Render {
            location,
            message: err.to_string(),
        }
    }
}
