//! Configuration management for fridge
//!
//! This crate handles:
//! - Settings validation (scripts directory, cron file, schedule)
//! - Cron schedule validation
//! - Logging initialization

pub mod logging;
pub mod schedule;
pub mod settings;

// Re-export error types from core
pub use fridge_core::{Error, Result};

pub use schedule::CronSchedule;
pub use settings::{
    CRON_SCHEDULE_VAR, DEFAULT_CONTAINER_SCRIPTS_DIR, DEFAULT_CRON_FILE, DEFAULT_SCRIPTS_DIR,
    Settings,
};
