//! Command implementations
//!
//! One module per binary besides the lifecycle flows of `fridge` itself.

pub mod codegen;
pub mod lifecycle;
pub mod remote;
pub mod storage;
