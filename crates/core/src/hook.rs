//! Hook categories and discovered scripts
//!
//! Scripts are grouped by the directory they live in. The set of directories
//! is closed: anything else under the scripts root is ignored.

use crate::Error;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Lifecycle phase a script belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookCategory {
    /// Run once while the container is provisioned
    InstallDependencies,
    /// First step of every run
    BeforeBackups,
    /// The backups themselves
    Backups,
    /// Last step of every run
    AfterBackups,
    /// Run when any backup-phase script fails
    OnError,
}

impl HookCategory {
    /// Every category, in lifecycle order
    pub const ALL: [Self; 5] = [
        Self::InstallDependencies,
        Self::BeforeBackups,
        Self::Backups,
        Self::AfterBackups,
        Self::OnError,
    ];

    /// Categories executed by the run flow, in order
    pub const BACKUP_SEQUENCE: [Self; 3] =
        [Self::BeforeBackups, Self::Backups, Self::AfterBackups];

    /// Directory name under the scripts root
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::InstallDependencies => "install_dependencies",
            Self::BeforeBackups => "before_backups",
            Self::Backups => "backups",
            Self::AfterBackups => "after_backups",
            Self::OnError => "on_error",
        }
    }
}

impl fmt::Display for HookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for HookCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.dir_name() == s)
            .ok_or_else(|| Error::UnknownHookCategory(s.to_string()))
    }
}

/// A single executable discovered under a category directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    path: PathBuf,
    category: HookCategory,
    name: String,
}

impl ScriptEntry {
    /// Create an entry for a file directly inside its category directory
    ///
    /// The relative name is the path with the category directory stripped,
    /// which for direct children is the file name.
    pub fn new(path: impl Into<PathBuf>, category: HookCategory) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            category,
            name,
        }
    }

    /// Full path of the script
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Category the script was discovered in
    #[must_use]
    pub fn category(&self) -> HookCategory {
        self.category
    }

    /// Path relative to the category directory
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ScriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Immutable view of every script found under a scripts root
///
/// Every category has an entry. Categories without a directory on disk map
/// to an empty list.
#[derive(Debug, Clone, Default)]
pub struct ScriptsSnapshot {
    root: PathBuf,
    scripts: IndexMap<HookCategory, Vec<ScriptEntry>>,
}

impl ScriptsSnapshot {
    /// Build a snapshot from discovered scripts
    ///
    /// Lists are kept in the order given. Missing categories are filled in
    /// as empty, and the map is laid out in lifecycle order.
    pub fn new(
        root: impl Into<PathBuf>,
        mut scripts: IndexMap<HookCategory, Vec<ScriptEntry>>,
    ) -> Self {
        let scripts = HookCategory::ALL
            .into_iter()
            .map(|category| (category, scripts.shift_remove(&category).unwrap_or_default()))
            .collect();

        Self {
            root: root.into(),
            scripts,
        }
    }

    /// Root directory the snapshot was taken from
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scripts of a category in execution order
    #[must_use]
    pub fn scripts(&self, category: HookCategory) -> &[ScriptEntry] {
        self.scripts
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over all categories in lifecycle order
    pub fn iter(&self) -> impl Iterator<Item = (HookCategory, &[ScriptEntry])> {
        HookCategory::ALL
            .into_iter()
            .map(|category| (category, self.scripts(category)))
    }

    /// Total number of scripts across all categories
    #[must_use]
    pub fn total(&self) -> usize {
        self.scripts.values().map(Vec::len).sum()
    }

    /// Check whether no scripts were found at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
