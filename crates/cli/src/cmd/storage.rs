//! `store_var` and `load_var`: scratch values shared between scripts

use anyhow::{Context, Result};
use clap::Parser;
use fridge_engine::FileStorage;
use serde_json::Value;

use crate::command::Command;

/// Utility to store values for usage between scripts
#[derive(Debug, Parser)]
#[command(name = "store_var", version)]
pub struct StoreVarCommand {
    /// The key where to store the value
    pub key: String,

    /// The value to be stored
    pub value: String,
}

impl StoreVarCommand {
    /// Store the value in `storage`
    pub fn store_in(&self, storage: &FileStorage) -> Result<()> {
        storage
            .set(self.key.clone(), self.value.clone())
            .with_context(|| format!("Failed to store '{}'", self.key))
    }
}

impl Command for StoreVarCommand {
    type Output = ();

    fn execute(&self) -> Result<()> {
        self.store_in(&FileStorage::in_temp_dir())
    }
}

/// Utility to load values for usage between scripts
#[derive(Debug, Parser)]
#[command(name = "load_var", version)]
pub struct LoadVarCommand {
    /// The key to look up
    pub key: String,

    /// Value printed when the key is not found
    #[arg(default_value = "")]
    pub default: String,
}

impl LoadVarCommand {
    /// Look the key up in `storage`
    ///
    /// Strings are returned as is, other JSON values in their JSON form.
    pub fn load_from(&self, storage: &FileStorage) -> Result<String> {
        let value = storage
            .get(&self.key)
            .with_context(|| format!("Failed to load '{}'", self.key))?;

        Ok(match value {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => self.default.clone(),
        })
    }
}

impl Command for LoadVarCommand {
    type Output = String;

    fn execute(&self) -> Result<String> {
        self.load_from(&FileStorage::in_temp_dir())
    }
}
