//! Lifecycle flows against real scripts on disk

#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::panic)]

use fridge_config::CronSchedule;
use fridge_core::ScratchStorage;
use fridge_engine::{
    CronEntry, FileStorage, Lifecycle, LifecycleOutcome, ProcessRunner, ScriptLoader,
};
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn script(root: &Path, hook: &str, name: &str, body: &str) {
    let dir = root.join(hook);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
#[serial]
fn test_run_recovers_through_error_hooks() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("scripts");
    let storage_dir = temp.path().join("storage");
    fs::create_dir(&storage_dir).unwrap();

    script(&root, "before_backups", "a.sh", "echo A");
    script(&root, "before_backups", "b.sh", "echo B; exit 2");
    script(&root, "before_backups", "c.sh", "echo C");
    script(&root, "backups", "d.sh", "echo D");
    script(&root, "on_error", "notify.sh", "echo \"notified: $1\"");

    let snapshot = ScriptLoader::new(&root).load().unwrap();
    let runner = ProcessRunner::with_writer(Vec::new());
    let storage = FileStorage::new(&storage_dir);
    storage.set("stale", "left over").unwrap();

    let outcome = Lifecycle::new(&snapshot, &runner, &storage).run().unwrap();

    let expected = format!(
        "Script '{}' finished with exit code '2'",
        root.join("before_backups").join("b.sh").display()
    );
    assert_eq!(outcome, LifecycleOutcome::Recovered(expected.clone()));

    let output = String::from_utf8(runner.into_writer()).unwrap();
    assert_eq!(output, format!("A\nB\nnotified: {expected}\n"));

    // Cleared on the way in and out
    assert_eq!(fs::read_dir(&storage_dir).unwrap().count(), 0);
}

/// Log sink shared with a scoped subscriber
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn position(lines: &[&str], from: usize, needle: &str) -> usize {
    lines[from..]
        .iter()
        .position(|line| line.contains(needle))
        .map(|offset| from + offset)
        .unwrap_or_else(|| panic!("no log line containing {needle:?} after line {from}"))
}

#[test]
#[serial]
fn test_run_logs_each_script_before_acting_on_it() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("scripts");
    script(&root, "backups", "d.sh", "exit 1");
    script(&root, "on_error", "1.sh", "exit 1");
    script(&root, "on_error", "2.sh", "exit 0");

    let snapshot = ScriptLoader::new(&root).load().unwrap();
    let runner = ProcessRunner::with_writer(Vec::new());
    let storage = FileStorage::new(temp.path());

    let logs = LogBuffer::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .finish();

    let outcome = tracing::subscriber::with_default(subscriber, || {
        Lifecycle::new(&snapshot, &runner, &storage).run().unwrap()
    });
    assert!(matches!(outcome, LifecycleOutcome::Recovered(_)));

    let dump = root.join("backups").join("d.sh").display().to_string();
    let first = root.join("on_error").join("1.sh").display().to_string();
    let second = root.join("on_error").join("2.sh").display().to_string();
    let message = format!("Script '{dump}' finished with exit code '1'");

    let contents = logs.contents();
    let lines: Vec<&str> = contents.lines().collect();

    let mut at = position(&lines, 0, &format!("Starting '{dump}'"));
    at = position(&lines, at + 1, &format!("[\"{dump}\"]"));
    at = position(&lines, at + 1, &message);
    assert!(lines[at].contains("ERROR"));
    at = position(&lines, at + 1, "Hook: 'on_error'");
    at = position(&lines, at + 1, &format!("Starting '{first}'"));
    at = position(&lines, at + 1, &format!("\"{first}\", \"{message}\""));
    at = position(&lines, at + 1, "Suppressed on_error failure");
    assert!(lines[at].contains("WARN"));
    assert!(lines[at].contains(&first));
    position(&lines, at + 1, &format!("Starting '{second}'"));

    let suppressed: Vec<_> = lines
        .iter()
        .filter(|line| line.contains("Suppressed on_error failure"))
        .collect();
    assert_eq!(suppressed.len(), 1);
}

#[test]
#[serial]
fn test_storage_is_empty_when_scripts_start() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("scripts");
    let storage_dir = temp.path().join("storage");
    fs::create_dir(&storage_dir).unwrap();
    let storage = FileStorage::new(&storage_dir);
    storage.set("stale", "from an earlier run").unwrap();
    let pointer = storage.pointer_path().display().to_string();

    script(
        &root,
        "before_backups",
        "check.sh",
        &format!("cat '{pointer}' 2>/dev/null || echo none"),
    );

    let snapshot = ScriptLoader::new(&root).load().unwrap();
    let runner = ProcessRunner::with_writer(Vec::new());

    let outcome = Lifecycle::new(&snapshot, &runner, &storage).run().unwrap();

    assert!(outcome.is_success());
    assert_eq!(String::from_utf8(runner.into_writer()).unwrap(), "none\n");
    assert_eq!(storage.get("stale").unwrap(), None);
    storage.clear().unwrap();
}

#[test]
#[serial]
fn test_initialize_registers_cron_before_installing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("scripts");
    let cron_path = temp.path().join("root");

    script(
        &root,
        "install_dependencies",
        "apk.sh",
        &format!("cat '{}'; exit 1", cron_path.display()),
    );
    script(&root, "on_error", "notify.sh", "echo should not run");

    let snapshot = ScriptLoader::new(&root).load().unwrap();
    let runner = ProcessRunner::with_writer(Vec::new());
    let storage = FileStorage::new(temp.path());
    let cron = CronEntry::new(CronSchedule::parse("15 3 * * *").unwrap());

    let outcome = Lifecycle::new(&snapshot, &runner, &storage)
        .initialize(&cron, &cron_path)
        .unwrap();

    assert!(matches!(outcome, LifecycleOutcome::Fatal(_)));
    assert_eq!(String::from_utf8(runner.into_writer()).unwrap(), cron.render());
}

#[test]
#[serial]
fn test_non_executable_script_counts_as_failure() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("scripts");
    script(&root, "backups", "dump.sh", "echo dump");
    fs::set_permissions(
        root.join("backups").join("dump.sh"),
        fs::Permissions::from_mode(0o644),
    )
    .unwrap();
    script(&root, "after_backups", "cleanup.sh", "echo cleanup");

    let snapshot = ScriptLoader::new(&root).load().unwrap();
    let runner = ProcessRunner::with_writer(Vec::new());
    let storage = FileStorage::new(temp.path());

    let outcome = Lifecycle::new(&snapshot, &runner, &storage).run().unwrap();

    assert!(matches!(outcome, LifecycleOutcome::Recovered(_)));
    assert!(runner.into_writer().is_empty());
}
