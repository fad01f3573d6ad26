//! # Fridge Engine
//!
//! Runs backup scripts inside a sidecar container.
//!
//! - **Hooks**: discovery of scripts per category, the process runner and
//!   the lifecycle orchestrator (initialize and run flows)
//! - **Storage**: scratch key-value file shared by the scripts of one run
//! - **Cron**: cron file entry for the recurring run
//! - **Remote**: exec into a sibling container of the same pod

pub mod cron;
pub mod hooks;
pub mod process;
pub mod remote;
pub mod storage;

// Re-export error types from core
pub use fridge_core::{Error, Result};

// Re-export commonly used types
pub use cron::CronEntry;
pub use hooks::{Lifecycle, LifecycleOutcome, ProcessRunner, ScriptLoader, ScriptRunner};
pub use storage::FileStorage;
