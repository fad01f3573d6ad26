//! Scratch storage shared by scripts
//!
//! A JSON object file lets one script hand values to a later one within the
//! same run. Its randomly named data file is recorded in a pointer file with a
//! fixed name, so every process in the container finds the same store.

use fridge_core::{Error, Result, ScratchStorage};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the pointer file inside the storage directory
pub const POINTER_FILE_NAME: &str = "fridge_storage_path";

/// Scratch storage backed by files in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    pointer: PathBuf,
}

impl FileStorage {
    /// Storage rooted in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let pointer = dir.join(POINTER_FILE_NAME);
        Self { dir, pointer }
    }

    /// Storage in the system temp directory
    #[must_use]
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Location of the pointer file
    #[must_use]
    pub fn pointer_path(&self) -> &Path {
        &self.pointer
    }

    /// Data file named by the pointer file, if one is set up
    fn current_store(&self) -> Result<Option<PathBuf>> {
        let name = match fs::read_to_string(&self.pointer) {
            Ok(name) => name,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::FileRead {
                    path: self.pointer.clone(),
                    source,
                });
            }
        };

        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::Storage(format!(
                "pointer file {} holds an invalid store name",
                self.pointer.display()
            )));
        }

        Ok(Some(self.dir.join(name)))
    }

    /// Path of the data file, creating the pointer and an empty store when
    /// missing
    pub fn store_path(&self) -> Result<PathBuf> {
        let path = if let Some(path) = self.current_store()? {
            path
        } else {
            let name = uuid::Uuid::new_v4().to_string();
            write_file(&self.pointer, &name)?;
            tracing::debug!("Initialized scratch storage {}", name);
            self.dir.join(name)
        };

        if !path.is_file() {
            write_file(&path, "{}")?;
        }

        Ok(path)
    }

    /// Load every stored value
    pub fn load(&self) -> Result<Map<String, Value>> {
        let path = self.store_path()?;
        let content = fs::read_to_string(&path).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::Storage(format!("{} is not a JSON object: {e}", path.display()))
        })
    }

    /// Replace the stored values
    pub fn store(&self, data: &Map<String, Value>) -> Result<()> {
        let path = self.store_path()?;
        let content = serde_json::to_string(data)
            .map_err(|e| Error::Storage(format!("Failed to serialize storage: {e}")))?;
        write_file(&path, &content)
    }

    /// Look up one value
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    /// Store one value, keeping the others
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let mut data = self.load()?;
        data.insert(key.into(), value.into());
        self.store(&data)
    }
}

impl ScratchStorage for FileStorage {
    fn clear(&self) -> Result<()> {
        let Some(store) = self.current_store()? else {
            return Ok(());
        };

        remove_if_exists(&store)?;
        remove_if_exists(&self.pointer)?;
        tracing::debug!("Cleared scratch storage {}", store.display());
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Storage(format!(
            "Failed to remove {}: {e}",
            path.display()
        ))),
    }
}
