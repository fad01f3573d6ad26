//! Script discovery
//!
//! Builds a [`ScriptsSnapshot`] from the category directories under the
//! scripts root.

use fridge_core::{Error, HookCategory, Result, ScriptEntry, ScriptsSnapshot};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Discover scripts under a scripts root
pub struct ScriptLoader {
    root: PathBuf,
}

impl ScriptLoader {
    /// Create a loader for the given scripts root
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Scan every category directory
    ///
    /// A category whose directory is missing yields an empty list. Only
    /// regular files directly inside the directory are picked up, sorted by
    /// full path; that order is the execution order.
    ///
    /// # Errors
    ///
    /// Returns an error if a category directory exists but cannot be read
    pub fn load(&self) -> Result<ScriptsSnapshot> {
        let mut scripts = IndexMap::new();

        for category in HookCategory::ALL {
            let dir = self.root.join(category.dir_name());
            if !dir.is_dir() {
                tracing::debug!("No {} directory at {}", category, dir.display());
                continue;
            }

            let entries = Self::load_dir(&dir, category)?;
            tracing::debug!(
                hook = %category,
                count = entries.len(),
                "Discovered scripts"
            );
            scripts.insert(category, entries);
        }

        Ok(ScriptsSnapshot::new(self.root.clone(), scripts))
    }

    /// List the regular files of one category directory in path order
    fn load_dir(dir: &Path, category: HookCategory) -> Result<Vec<ScriptEntry>> {
        let read_error = |source| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut file_paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            // is_file follows symlinks, so links to files count and links to
            // directories do not
            if path.is_file() {
                file_paths.push(path);
            }
        }

        file_paths.sort();

        Ok(file_paths
            .into_iter()
            .map(|path| ScriptEntry::new(path, category))
            .collect())
    }
}
