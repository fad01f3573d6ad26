//! Core types and utilities for fridge
//!
//! This is the foundation crate that all other fridge crates depend on.
//! It provides:
//! - Base error types
//! - Hook categories and the immutable scripts snapshot
//! - Core behavioral traits (`ScratchStorage`)
//!
//! This crate has no dependencies on other fridge crates.

pub mod error;
pub mod hook;
pub mod traits;

pub use error::{Error, Result};
pub use hook::{HookCategory, ScriptEntry, ScriptsSnapshot};
pub use traits::ScratchStorage;
