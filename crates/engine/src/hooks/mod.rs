//! Hook system for backup scripts
//!
//! Scripts live in one directory per [`HookCategory`] under the scripts root
//! and run in lexicographic path order, one at a time.
//!
//! ## Execution Model
//!
//! - `initialize`: writes the cron file, then runs `install_dependencies`.
//!   Any failure is fatal.
//! - `run`: clears scratch storage, runs `before_backups`, `backups` and
//!   `after_backups`. The first failure stops the sequence and triggers every
//!   `on_error` script. Storage is cleared again whatever happened.
//!
//! ## Module Organization
//!
//! - `loader`: script discovery from the filesystem
//! - `executor`: process runner with streamed output
//! - `lifecycle`: the orchestrator for both flows
//!
//! [`HookCategory`]: fridge_core::HookCategory

pub mod executor;
pub mod lifecycle;
pub mod loader;

// Re-export main types for convenience
pub use executor::{ExecutionResult, ProcessRunner, ScriptRunner, ScriptStatus};
pub use lifecycle::{ERROR_ARGUMENT, Lifecycle, LifecycleOutcome};
pub use loader::ScriptLoader;
