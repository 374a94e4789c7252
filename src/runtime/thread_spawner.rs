//! OS thread spawner implementation (heavyweight mode).

use std::thread;

use crate::core::{BatchError, ConcurrencyMode, Spawn, TaskJob};

/// Default thread name prefix, suffixed with the task index.
pub const DEFAULT_THREAD_PREFIX: &str = "platform-worker";

/// Spawner that gives every task its own OS thread and stack.
#[derive(Debug, Clone)]
pub struct ThreadSpawner {
    name_prefix: String,
    stack_size: Option<usize>,
}

impl Default for ThreadSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadSpawner {
    /// Spawner with the platform default stack size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name_prefix: DEFAULT_THREAD_PREFIX.to_string(),
            stack_size: None,
        }
    }

    /// Set the stack size in bytes of every spawned thread.
    #[must_use]
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Set the thread name prefix.
    #[must_use]
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Configured stack size, if any.
    #[must_use]
    pub const fn stack_size(&self) -> Option<usize> {
        self.stack_size
    }
}

impl Spawn for ThreadSpawner {
    fn mode(&self) -> ConcurrencyMode {
        ConcurrencyMode::Heavyweight
    }

    fn spawn(&self, job: TaskJob) -> Result<(), BatchError> {
        let task_id = job.id();
        let mut builder = thread::Builder::new().name(format!("{}-{task_id}", self.name_prefix));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        // Detached: the batch barrier is the join point.
        builder
            .spawn(move || job.run_blocking())
            .map(drop)
            .map_err(|source| BatchError::Spawn { task_id, source })
    }
}
