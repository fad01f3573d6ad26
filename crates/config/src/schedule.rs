//! Cron schedule validation
//!
//! Schedules use standard five-field cron syntax (or an `@` nickname) and are
//! checked with `croner` before anything is written to the cron file.

use crate::{Error, Result};
use croner::Cron;
use std::fmt;

/// A cron schedule expression that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule(String);

impl CronSchedule {
    /// Validate a schedule expression
    ///
    /// Surrounding whitespace is trimmed; the expression itself is kept
    /// verbatim so it can be written back exactly.
    pub fn parse(expression: &str) -> Result<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(Error::InvalidSchedule {
                schedule: expression.to_string(),
                reason: "schedule is empty".to_string(),
            });
        }

        Cron::new(expression)
            .parse()
            .map_err(|e| Error::InvalidSchedule {
                schedule: expression.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self(expression.to_string()))
    }

    /// The expression as provided
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_schedules() {
        for expression in ["0 2 * * *", "*/15 * * * *", "30 4 1,15 * 1-5"] {
            let schedule = CronSchedule::parse(expression).unwrap();
            assert_eq!(schedule.as_str(), expression);
        }
    }

    #[test]
    fn test_schedule_is_trimmed() {
        let schedule = CronSchedule::parse("  0 2 * * *\n").unwrap();
        assert_eq!(schedule.to_string(), "0 2 * * *");
    }

    #[test]
    fn test_empty_schedule_is_rejected() {
        let err = CronSchedule::parse("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidSchedule { .. }));
    }

    #[test]
    fn test_invalid_schedules_are_rejected() {
        for expression in ["not a schedule", "61 * * * *", "* * * *"] {
            let err = CronSchedule::parse(expression).unwrap_err();
            match err {
                Error::InvalidSchedule { schedule, .. } => assert_eq!(schedule, expression),
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
