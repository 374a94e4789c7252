//! Concurrency mode selection and task count parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BatchError;

/// How each task of a batch is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Cooperative tokio tasks multiplexed over a small worker pool (M:N).
    Lightweight,
    /// One dedicated OS thread per task (1:1).
    #[default]
    Heavyweight,
}

impl ConcurrencyMode {
    /// Short label used in logs and thread names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lightweight => "lightweight",
            Self::Heavyweight => "heavyweight",
        }
    }
}

impl fmt::Display for ConcurrencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConcurrencyMode {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v" | "virtual" | "light" | "lightweight" | "task" => Ok(Self::Lightweight),
            "p" | "platform" | "heavy" | "heavyweight" | "thread" => Ok(Self::Heavyweight),
            other => Err(BatchError::invalid(format!(
                "unknown mode `{other}` (expected 'v' for lightweight or 'p' for heavyweight)"
            ))),
        }
    }
}

/// Parse a task count from text, rejecting zero, negative and non-numeric input.
///
/// # Errors
///
/// Returns [`BatchError::InvalidArgument`] unless `s` is a positive integer.
pub fn parse_task_count(s: &str) -> Result<usize, BatchError> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|e| BatchError::invalid(format!("task count `{s}` is not an integer: {e}")))?;
    if value <= 0 {
        return Err(BatchError::invalid(format!(
            "task count must be greater than 0, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| BatchError::invalid(format!("task count {value} is too large")))
}
