//! Runtime settings
//!
//! Flags and environment values are read once by the CLI and validated here.
//! The resulting [`Settings`] is passed by reference to the orchestrator;
//! nothing below this layer looks at the process environment.

use crate::schedule::CronSchedule;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the backup cron schedule
pub const CRON_SCHEDULE_VAR: &str = "CRON_BACKUP_SCHEDULE";

/// Default scripts root inside the container
pub const DEFAULT_SCRIPTS_DIR: &str = "/scripts";

/// Default cron file written during initialize
pub const DEFAULT_CRON_FILE: &str = "/etc/crontabs/root";

/// Default mount point of the scripts inside the container, used for manifests
pub const DEFAULT_CONTAINER_SCRIPTS_DIR: &str = "/scripts";

/// Validated settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    scripts_dir: PathBuf,
    cron_file: PathBuf,
    schedule: Option<CronSchedule>,
}

impl Settings {
    /// Validate settings
    ///
    /// # Errors
    ///
    /// - `NotADirectory` if the scripts root does not exist
    /// - `InvalidSchedule` if a schedule is given but is not valid cron syntax
    pub fn new(
        scripts_dir: impl Into<PathBuf>,
        cron_file: impl Into<PathBuf>,
        schedule: Option<&str>,
    ) -> Result<Self> {
        let scripts_dir = scripts_dir.into();
        if !scripts_dir.is_dir() {
            return Err(Error::NotADirectory { path: scripts_dir });
        }

        let schedule = schedule.map(CronSchedule::parse).transpose()?;

        Ok(Self {
            scripts_dir,
            cron_file: cron_file.into(),
            schedule,
        })
    }

    /// Scripts root directory
    #[must_use]
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    /// Cron file written during initialize
    #[must_use]
    pub fn cron_file(&self) -> &Path {
        &self.cron_file
    }

    /// The backup schedule, required by initialize
    pub fn schedule(&self) -> Result<&CronSchedule> {
        self.schedule
            .as_ref()
            .ok_or(Error::MissingVariable(CRON_SCHEDULE_VAR))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_with_schedule() {
        let temp = TempDir::new().unwrap();
        let settings =
            Settings::new(temp.path(), temp.path().join("root"), Some("0 3 * * *")).unwrap();

        assert_eq!(settings.scripts_dir(), temp.path());
        assert_eq!(settings.cron_file(), temp.path().join("root"));
        assert_eq!(settings.schedule().unwrap().as_str(), "0 3 * * *");
    }

    #[test]
    fn test_missing_scripts_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = Settings::new(&missing, DEFAULT_CRON_FILE, None).unwrap_err();
        assert!(matches!(err, Error::NotADirectory { path } if path == missing));
    }

    #[test]
    fn test_scripts_dir_must_be_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        std::fs::write(&file, "").unwrap();

        assert!(Settings::new(&file, DEFAULT_CRON_FILE, None).is_err());
    }

    #[test]
    fn test_missing_schedule_is_reported_on_access() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::new(temp.path(), DEFAULT_CRON_FILE, None).unwrap();

        let err = settings.schedule().unwrap_err();
        assert!(matches!(err, Error::MissingVariable(CRON_SCHEDULE_VAR)));
        assert_eq!(
            err.to_string(),
            "Could not find 'CRON_BACKUP_SCHEDULE' in the environment variables"
        );
    }

    #[test]
    fn test_invalid_schedule_fails_fast() {
        let temp = TempDir::new().unwrap();
        let err = Settings::new(temp.path(), DEFAULT_CRON_FILE, Some("every day")).unwrap_err();
        assert!(matches!(err, Error::InvalidSchedule { .. }));
    }
}
