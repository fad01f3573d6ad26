//! `fridge-codegen`: Kubernetes manifests for a scripts directory

use anyhow::{Context, Result};
use clap::Parser;
use fridge_config::DEFAULT_CONTAINER_SCRIPTS_DIR;
use fridge_core::Error;
use fridge_engine::ScriptLoader;
use fridge_template::{ManifestContext, ManifestEngine};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::command::Command;

/// Generates the Kubernetes configuration for a scripts directory
#[derive(Debug, Parser)]
#[command(name = "fridge-codegen", version)]
pub struct CodegenCommand {
    /// The Kubernetes namespace
    pub namespace: String,

    /// The current project name
    pub project_name: String,

    /// Container where volumeMounts and volumes are to be used
    pub container_name: String,

    /// Directory containing the hooks
    pub in_dir: PathBuf,

    /// Directory for the generated manifests
    pub out_dir: PathBuf,

    /// Scripts folder inside the container
    #[arg(
        long,
        visible_alias = "csp",
        value_name = "PATH",
        default_value = DEFAULT_CONTAINER_SCRIPTS_DIR
    )]
    pub container_scripts_path: String,
}

impl CodegenCommand {
    fn context(&self) -> ManifestContext {
        ManifestContext {
            namespace: self.namespace.clone(),
            project_name: self.project_name.clone(),
            container_name: self.container_name.clone(),
            container_scripts_path: self.container_scripts_path.clone(),
        }
    }

    /// Render the manifests, returning the written files
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        for dir in [&self.in_dir, &self.out_dir] {
            if !dir.is_dir() {
                return Err(Error::NotADirectory { path: dir.clone() }.into());
            }
        }

        let snapshot = ScriptLoader::new(&self.in_dir)
            .load()
            .context("Failed to discover scripts")?;

        ManifestEngine::new()
            .write_all(&self.context(), &snapshot, &self.out_dir)
            .context("Failed to generate manifests")
    }
}

impl Command for CodegenCommand {
    type Output = ();

    fn execute(&self) -> Result<()> {
        for path in self.generate()? {
            println!("{} {}", "Generated".green(), path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> CodegenCommand {
        CodegenCommand::try_parse_from(
            ["fridge-codegen"].iter().chain(args).copied(),
        )
        .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        CodegenCommand::command().debug_assert();
    }

    #[test]
    fn test_default_container_scripts_path() {
        let cmd = parse(&["prod", "shop", "db", "in", "out"]);
        assert_eq!(cmd.container_scripts_path, "/scripts");
        assert_eq!(cmd.in_dir, PathBuf::from("in"));
    }

    #[test]
    fn test_short_alias() {
        let cmd = parse(&["prod", "shop", "db", "in", "out", "--csp", "/opt/scripts"]);
        assert_eq!(cmd.container_scripts_path, "/opt/scripts");
    }

    #[test]
    fn test_generate() {
        let scripts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir(scripts.path().join("backups")).unwrap();
        fs::write(scripts.path().join("backups").join("dump.sh"), "pg_dump\n").unwrap();

        let cmd = parse(&[
            "prod",
            "shop",
            "db",
            scripts.path().to_str().unwrap(),
            out.path().to_str().unwrap(),
        ]);
        let written = cmd.generate().unwrap();

        assert_eq!(written.len(), 4);
        let mounts =
            fs::read_to_string(out.path().join("shop-partial_volume_mounts.yaml")).unwrap();
        assert!(mounts.contains("  - mountPath: /scripts/backups\n"));
    }

    #[test]
    fn test_missing_input_directory() {
        let out = TempDir::new().unwrap();
        let missing = out.path().join("missing");

        let cmd = parse(&[
            "prod",
            "shop",
            "db",
            missing.to_str().unwrap(),
            out.path().to_str().unwrap(),
        ]);
        let err = cmd.generate().unwrap_err();

        assert!(err.to_string().contains("is not a valid directory"));
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
