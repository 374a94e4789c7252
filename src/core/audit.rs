//! Task lifecycle event sinks.
//!
//! Every task emits a start event when dispatched and an end event carrying its
//! outcome. Sinks are optional; the `tracing` log lines are always written.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{BatchId, ConcurrencyMode, TaskId, TaskOutcome};
use crate::util::clock::now_ms;

/// Lifecycle event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// Task dispatched and entering its workload.
    Start,
    /// Task reached a terminal state.
    End(TaskOutcome),
}

/// Lifecycle event for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Batch the task belongs to.
    pub batch_id: BatchId,
    /// Task index.
    pub task_id: TaskId,
    /// Scheduling mode.
    pub mode: ConcurrencyMode,
    /// Event kind.
    pub kind: TaskEventKind,
    /// Label of the OS thread (and tokio task, if any) running the task.
    pub worker: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

impl TaskEvent {
    /// Whether this is a start event.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self.kind, TaskEventKind::Start)
    }

    /// Whether this is an end event.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, TaskEventKind::End(_))
    }
}

/// Event sink abstraction. Called concurrently from every task.
pub trait EventSink: Send + Sync {
    /// Record a lifecycle event.
    fn record(&self, event: TaskEvent);
}

/// In-memory event sink for testing and dev.
pub struct InMemoryEventSink {
    events: Mutex<VecDeque<TaskEvent>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events.min(4096))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Number of stored events matching `pred`.
    pub fn count_where(&self, pred: impl Fn(&TaskEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&self, event: TaskEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Helper to build an event stamped with the current time.
#[must_use]
pub fn build_task_event(
    batch_id: BatchId,
    task_id: TaskId,
    mode: ConcurrencyMode,
    kind: TaskEventKind,
    worker: impl Into<String>,
) -> TaskEvent {
    TaskEvent {
        batch_id,
        task_id,
        mode,
        kind,
        worker: worker.into(),
        created_at_ms: now_ms(),
    }
}
