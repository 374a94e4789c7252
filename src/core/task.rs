//! Per-task identity, lifecycle states and outcomes.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ConcurrencyMode, InterruptSignal};

/// Index of a task inside its batch (`0..count`).
pub type TaskId = usize;

/// Identifier shared by all tasks of one batch.
pub type BatchId = Uuid;

/// Lifecycle state of a task.
///
/// `Created -> Running -> (Completed | Interrupted | Panicked)`, or
/// `Created -> NotStarted` when the task was never dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Spawn requested, not yet dispatched by the scheduler.
    Created,
    /// Dispatched and inside its workload.
    Running,
    /// Reached a terminal state.
    Finished(TaskOutcome),
}

/// Terminal outcome of a task. Every outcome counts towards the join barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// The delay elapsed normally.
    Completed,
    /// An interrupt arrived during the delay.
    Interrupted,
    /// The workload unwound before reporting an outcome.
    Panicked,
    /// The task was never dispatched.
    NotStarted,
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
            Self::Panicked => "panicked",
            Self::NotStarted => "not_started",
        })
    }
}

/// Everything a workload gets to know about the task it runs.
#[derive(Debug, Clone)]
pub struct TaskContext {
    id: TaskId,
    batch_id: BatchId,
    mode: ConcurrencyMode,
    interrupt: Arc<InterruptSignal>,
}

impl TaskContext {
    /// Build a context for task `id` of `batch_id`.
    #[must_use]
    pub fn new(
        id: TaskId,
        batch_id: BatchId,
        mode: ConcurrencyMode,
        interrupt: Arc<InterruptSignal>,
    ) -> Self {
        Self {
            id,
            batch_id,
            mode,
            interrupt,
        }
    }

    /// Task index within the batch.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Batch this task belongs to.
    #[must_use]
    pub const fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    /// Mode the task is scheduled in.
    #[must_use]
    pub const fn mode(&self) -> ConcurrencyMode {
        self.mode
    }

    /// Interrupt signal for this task.
    #[must_use]
    pub fn interrupt(&self) -> &InterruptSignal {
        &self.interrupt
    }
}
