//! Child processes with streamed standard output
//!
//! Backup scripts can run for a long time. Their output is copied to the
//! operator as it arrives instead of being collected until exit.

use duct::{Expression, ReaderHandle};
use std::io::{self, Read, Write};

const CHUNK_SIZE: usize = 1024;

/// Start an expression with its stdout captured for streaming
///
/// Non-zero exit codes are not turned into errors; the caller inspects the
/// code returned by [`drain`].
pub fn spawn(expression: &Expression) -> io::Result<ReaderHandle> {
    expression.unchecked().reader()
}

/// Copy a child's stdout into `out` until it closes, then reap the child
///
/// Every chunk is flushed as soon as it is read. Returns the exit code, or
/// `None` when the child was terminated by a signal.
pub fn drain<W: Write + ?Sized>(
    mut reader: ReaderHandle,
    out: &mut W,
) -> io::Result<Option<i32>> {
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                out.write_all(&buf[..n])?;
                out.flush()?;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    // Reaching EOF waits for the child, so its status is available here
    match reader.try_wait()? {
        Some(output) => Ok(output.status.code()),
        None => Err(io::Error::other("child process still running after EOF")),
    }
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_drain_copies_output_and_exit_code() {
        let reader = spawn(&duct::cmd!("sh", "-c", "printf 'one\\ntwo\\n'; exit 3")).unwrap();
        let mut out = Vec::new();

        let code = drain(reader, &mut out).unwrap();

        assert_eq!(code, Some(3));
        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\n");
    }

    #[test]
    #[serial]
    fn test_drain_reports_signal_as_none() {
        let reader = spawn(&duct::cmd!("sh", "-c", "kill -9 $$")).unwrap();
        let mut out = Vec::new();

        assert_eq!(drain(reader, &mut out).unwrap(), None);
        assert!(out.is_empty());
    }

    #[test]
    #[serial]
    fn test_spawn_missing_program_fails() {
        assert!(spawn(&duct::cmd!("/definitely/not/a/program")).is_err());
    }
}
