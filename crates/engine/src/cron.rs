//! Cron file entry for the recurring backup run

use fridge_config::CronSchedule;
use fridge_core::{Error, Result};
use std::fs;
use std::path::Path;

/// Command cron invokes on every tick
pub const RUN_COMMAND: &str = "fridge -r";

const TRAILER: &str = "# remember to end this file with an empty new line";

/// A single cron line: schedule plus command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronEntry {
    schedule: CronSchedule,
    command: String,
}

impl CronEntry {
    /// Entry running the backup lifecycle on `schedule`
    #[must_use]
    pub fn new(schedule: CronSchedule) -> Self {
        Self::with_command(schedule, RUN_COMMAND)
    }

    /// Entry running an arbitrary command
    pub fn with_command(schedule: CronSchedule, command: impl Into<String>) -> Self {
        Self {
            schedule,
            command: command.into(),
        }
    }

    /// Schedule expression
    #[must_use]
    pub fn schedule(&self) -> &CronSchedule {
        &self.schedule
    }

    /// Command run on each tick
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The cron line without a newline
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} {}", self.schedule, self.command)
    }

    /// Full cron file content
    ///
    /// crond ignores a last line that is not newline terminated, hence the
    /// trailing comment line and final newline.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}\n{TRAILER}\n", self.line())
    }

    /// Parse the first entry of cron file content
    ///
    /// Blank lines and comments are skipped. The schedule is taken verbatim
    /// (five fields, or one for `@` nicknames) and validated again.
    pub fn parse(content: &str) -> Result<Self> {
        let line = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .ok_or_else(|| Error::CronEntry("no cron line found".to_string()))?;

        let field_count = if line.starts_with('@') { 1 } else { 5 };
        let (schedule, command) = split_fields(line, field_count)
            .ok_or_else(|| Error::CronEntry(format!("missing command in '{line}'")))?;

        Ok(Self::with_command(CronSchedule::parse(schedule)?, command))
    }

    /// Write the cron file, replacing any previous content
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Cron schedule '{}' written to {}", self.schedule, path.display());
        Ok(())
    }
}

/// Split `line` after its first `count` whitespace separated fields
///
/// The returned prefix is the exact source text of those fields; the rest is
/// trimmed. Returns `None` when nothing follows them.
fn split_fields(line: &str, count: usize) -> Option<(&str, &str)> {
    let mut seen = 0;
    let mut in_field = false;

    for (idx, ch) in line.char_indices() {
        if !ch.is_whitespace() {
            in_field = true;
            continue;
        }
        if in_field {
            in_field = false;
            seen += 1;
            if seen == count {
                let rest = line[idx..].trim();
                return (!rest.is_empty()).then_some((&line[..idx], rest));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn schedule(expression: &str) -> CronSchedule {
        CronSchedule::parse(expression).unwrap()
    }

    #[test]
    fn test_render() {
        let entry = CronEntry::new(schedule("0 2 * * *"));
        assert_eq!(
            entry.render(),
            "0 2 * * * fridge -r\n# remember to end this file with an empty new line\n"
        );
    }

    #[test]
    fn test_parse_reproduces_schedule_and_command() {
        for expression in ["0 2 * * *", "*/15 1-5 * * 1-5", "30  4 1,15 *  *"] {
            let entry = CronEntry::new(schedule(expression));
            let parsed = CronEntry::parse(&entry.render()).unwrap();

            assert_eq!(parsed.schedule().as_str(), expression);
            assert_eq!(parsed.command(), RUN_COMMAND);
            assert_eq!(parsed, entry);
        }
    }

    #[test]
    fn test_parse_keeps_command_arguments() {
        let parsed = CronEntry::parse("# header\n\n5 4 * * 0 /usr/bin/env fridge -r -v\n").unwrap();
        assert_eq!(parsed.schedule().as_str(), "5 4 * * 0");
        assert_eq!(parsed.command(), "/usr/bin/env fridge -r -v");
    }

    #[test]
    fn test_parse_rejects_missing_command() {
        let err = CronEntry::parse("0 2 * * *\n").unwrap_err();
        assert!(matches!(err, Error::CronEntry(_)));
    }

    #[test]
    fn test_parse_rejects_empty_content() {
        let err = CronEntry::parse("# only a comment\n").unwrap_err();
        assert!(matches!(err, Error::CronEntry(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_schedule() {
        let err = CronEntry::parse("99 2 * * * fridge -r\n").unwrap_err();
        assert!(matches!(err, Error::InvalidSchedule { .. }));
    }

    #[test]
    fn test_write_replaces_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("root");
        std::fs::write(&path, "old content\n").unwrap();

        let entry = CronEntry::new(schedule("0 3 * * *"));
        entry.write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, entry.render());
        assert_eq!(CronEntry::parse(&content).unwrap(), entry);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let entry = CronEntry::new(schedule("0 3 * * *"));

        let err = entry.write(&temp.path().join("missing").join("root")).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("a b c", 2), Some(("a b", "c")));
        assert_eq!(split_fields("a  b   c d", 2), Some(("a  b", "c d")));
        assert_eq!(split_fields("a b", 2), None);
        assert_eq!(split_fields("@daily run", 1), Some(("@daily", "run")));
    }
}
