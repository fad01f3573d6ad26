//! Data handed to the manifest templates

use crate::{Error, Result};
use fridge_core::{HookCategory, ScriptEntry, ScriptsSnapshot};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Deployment coordinates shared by every manifest
#[derive(Debug, Clone, Serialize)]
pub struct ManifestContext {
    /// Kubernetes namespace
    pub namespace: String,

    /// Project name, used as the prefix of every resource name
    pub project_name: String,

    /// Container the scripts are mounted into
    pub container_name: String,

    /// Scripts root inside the container
    pub container_scripts_path: String,
}

impl ManifestContext {
    /// Mount path of one category inside the container
    #[must_use]
    pub fn mount_path(&self, category: HookCategory) -> String {
        Path::new(&self.container_scripts_path)
            .join(category.dir_name())
            .display()
            .to_string()
    }
}

/// One script and its content, split into lines
#[derive(Debug, Clone, Serialize)]
pub struct ScriptSource {
    /// Key of the script in its ConfigMap
    pub name: String,

    /// Content lines without terminators
    pub lines: Vec<String>,
}

impl ScriptSource {
    /// Read a discovered script
    pub fn load(script: &ScriptEntry) -> Result<Self> {
        let content = fs::read_to_string(script.path()).map_err(|source| Error::ScriptRead {
            path: script.path().to_path_buf(),
            source,
        })?;

        Ok(Self {
            name: script.name().to_string(),
            lines: content.lines().map(str::to_string).collect(),
        })
    }
}

/// Scripts of one category, in discovery order
#[derive(Debug, Clone, Serialize)]
pub struct HookScripts {
    /// The category
    pub hook: HookCategory,

    /// Its scripts
    pub scripts: Vec<ScriptSource>,
}

impl HookScripts {
    /// Read every script of the snapshot, one entry per category
    ///
    /// Categories without scripts are kept with an empty list so every
    /// manifest covers all five.
    pub fn load_all(snapshot: &ScriptsSnapshot) -> Result<Vec<Self>> {
        HookCategory::ALL
            .into_iter()
            .map(|hook| {
                let scripts = snapshot
                    .scripts(hook)
                    .iter()
                    .map(ScriptSource::load)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self { hook, scripts })
            })
            .collect()
    }
}
