//! Core batch abstractions: tasks, workloads, the join barrier and the runner.

pub mod audit;
pub mod barrier;
pub mod comparison;
pub mod error;
pub mod interrupt;
pub mod mode;
pub mod runner;
pub mod spawner;
pub mod task;
pub mod workload;

pub use audit::{build_task_event, EventSink, InMemoryEventSink, TaskEvent, TaskEventKind};
pub use barrier::{CompletionBarrier, OutcomeTally};
pub use comparison::{compare_modes, MemoryCheckpoint, ModeComparison};
pub use error::{AppResult, BatchError};
pub use interrupt::{InterruptSignal, SleepOutcome};
pub use mode::{parse_task_count, ConcurrencyMode};
pub use runner::{run_batch, BatchReport, BatchRunner, RunningBatch};
pub use spawner::{Spawn, TaskJob};
pub use task::{BatchId, TaskContext, TaskId, TaskOutcome, TaskState};
pub use workload::{SleepWorkload, Workload};
