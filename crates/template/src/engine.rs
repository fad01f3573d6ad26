//! Manifest rendering
//!
//! The engine wraps minijinja with whitespace control tuned for YAML output.

use crate::context::{HookScripts, ManifestContext};
use crate::templates;
use crate::{Error, Result};
use fridge_core::{HookCategory, ScriptsSnapshot};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ConfigMapView<'a> {
    #[serde(flatten)]
    context: &'a ManifestContext,
    #[serde(flatten)]
    entry: &'a HookScripts,
}

#[derive(Serialize)]
struct VolumesView<'a> {
    #[serde(flatten)]
    context: &'a ManifestContext,
    hooks: &'a [HookScripts],
}

#[derive(Serialize)]
struct Mount {
    hook: HookCategory,
    path: String,
}

#[derive(Serialize)]
struct MountsView<'a> {
    #[serde(flatten)]
    context: &'a ManifestContext,
    mounts: Vec<Mount>,
}

/// A rendered manifest ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// File name inside the output directory
    pub file_name: String,

    /// YAML content
    pub content: String,
}

/// Renderer for the Kubernetes manifests of a scripts directory
pub struct ManifestEngine {
    env: Environment<'static>,
}

impl ManifestEngine {
    /// Create a new engine
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Block tags on their own lines leave nothing behind, and files keep
        // their final newline
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        // Names ending in .yaml would otherwise get JSON escaping
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self { env }
    }

    fn render<S: Serialize>(&self, name: &str, source: &str, view: S) -> Result<String> {
        self.env
            .render_named_str(name, source, view)
            .map_err(Error::from)
    }

    /// Render one ConfigMap per category, joined into a multi-document file
    pub fn render_config_maps(
        &self,
        context: &ManifestContext,
        hooks: &[HookScripts],
    ) -> Result<String> {
        let documents = hooks
            .iter()
            .map(|entry| {
                self.render(
                    "config-maps.yaml",
                    templates::CONFIG_MAP,
                    ConfigMapView { context, entry },
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(documents.join("---\n"))
    }

    /// Render the service account name and volumes fragment
    pub fn render_volumes(
        &self,
        context: &ManifestContext,
        hooks: &[HookScripts],
    ) -> Result<String> {
        self.render(
            "partial_service_account_name_volumes.yaml",
            templates::SERVICE_ACCOUNT_NAME_VOLUMES,
            VolumesView { context, hooks },
        )
    }

    /// Render the volume mounts fragment
    pub fn render_volume_mounts(&self, context: &ManifestContext) -> Result<String> {
        let mounts = HookCategory::ALL
            .into_iter()
            .map(|hook| Mount {
                hook,
                path: context.mount_path(hook),
            })
            .collect();

        self.render(
            "partial_volume_mounts.yaml",
            templates::VOLUME_MOUNTS,
            MountsView { context, mounts },
        )
    }

    /// Render the service account, role and role binding
    pub fn render_accounts(&self, context: &ManifestContext) -> Result<String> {
        self.render("accounts.yaml", templates::ACCOUNTS, context)
    }

    /// Render every manifest for the given scripts
    pub fn render_all(
        &self,
        context: &ManifestContext,
        hooks: &[HookScripts],
    ) -> Result<Vec<Manifest>> {
        let project = &context.project_name;
        Ok(vec![
            Manifest {
                file_name: format!("{project}-config-maps.yaml"),
                content: self.render_config_maps(context, hooks)?,
            },
            Manifest {
                file_name: format!("{project}-partial_service_account_name_volumes.yaml"),
                content: self.render_volumes(context, hooks)?,
            },
            Manifest {
                file_name: format!("{project}-partial_volume_mounts.yaml"),
                content: self.render_volume_mounts(context)?,
            },
            Manifest {
                file_name: format!("{project}-accounts.yaml"),
                content: self.render_accounts(context)?,
            },
        ])
    }

    /// Render every manifest for a snapshot and write them to `out_dir`
    ///
    /// Existing files are replaced. Returns the written paths.
    pub fn write_all(
        &self,
        context: &ManifestContext,
        snapshot: &ScriptsSnapshot,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        if !out_dir.is_dir() {
            return Err(Error::NotADirectory(out_dir.to_path_buf()));
        }

        let hooks = HookScripts::load_all(snapshot)?;
        let mut written = Vec::new();

        for manifest in self.render_all(context, &hooks)? {
            let path = out_dir.join(&manifest.file_name);
            fs::write(&path, manifest.content).map_err(|source| Error::ManifestWrite {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

impl Default for ManifestEngine {
    fn default() -> Self {
        Self::new()
    }
}
