//! Error types for batch operations.

use thiserror::Error;

use super::TaskId;

/// Errors produced by the batch runner and its spawners.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Rejected input (non-positive count, unknown mode, invalid config).
    /// Raised before any task is spawned.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A spawner could not start a single task.
    #[error("failed to spawn task {task_id}: {source}")]
    Spawn {
        /// Task that could not be started.
        task_id: TaskId,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// Spawning stopped part-way; the spawned tasks were still joined.
    #[error("spawned only {spawned} of {requested} tasks: {source}")]
    PartialSpawn {
        /// Tasks that were started and joined.
        spawned: usize,
        /// Tasks requested for the batch.
        requested: usize,
        /// Underlying OS error from the failed spawn.
        #[source]
        source: std::io::Error,
    },
    /// The lightweight runtime could not be built.
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl BatchError {
    /// Shorthand for [`BatchError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
