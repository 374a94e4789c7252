//! Spawning seam between the runner and the scheduling backends.

use std::sync::Arc;
use std::thread;

use tracing::info;

use super::audit::{build_task_event, EventSink, TaskEventKind};
use super::barrier::CompletionGuard;
use super::{BatchError, ConcurrencyMode, TaskContext, TaskId, TaskOutcome, Workload};

/// Abstraction for launching one task on a scheduling backend.
///
/// Implementations must not wait for the task; the runner joins the whole
/// batch through its completion barrier.
pub trait Spawn: Send + Sync {
    /// Scheduling mode this spawner provides.
    fn mode(&self) -> ConcurrencyMode;

    /// Launch `job`. On error the job is dropped without running.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Spawn`] if the backend could not start the task.
    fn spawn(&self, job: TaskJob) -> Result<(), BatchError>;
}

/// A single task ready to be launched: context, workload and barrier slot.
pub struct TaskJob {
    ctx: TaskContext,
    workload: Arc<dyn Workload>,
    guard: CompletionGuard,
    sink: Option<Arc<dyn EventSink>>,
}

impl TaskJob {
    pub(crate) fn new(
        ctx: TaskContext,
        workload: Arc<dyn Workload>,
        guard: CompletionGuard,
        sink: Option<Arc<dyn EventSink>>,
    ) -> Self {
        Self {
            ctx,
            workload,
            guard,
            sink,
        }
    }

    /// Task index within its batch.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.ctx.id()
    }

    /// Context handed to the workload.
    #[must_use]
    pub const fn context(&self) -> &TaskContext {
        &self.ctx
    }

    /// Run to completion on the current OS thread.
    pub fn run_blocking(self) {
        let Self {
            ctx,
            workload,
            mut guard,
            sink,
        } = self;
        guard.start();
        let worker = worker_label();
        on_start(&ctx, sink.as_deref(), &worker);
        let outcome = workload.run_blocking(&ctx);
        on_end(&ctx, sink.as_deref(), &worker, outcome);
        guard.finish(outcome);
    }

    /// Run to completion as an async task.
    pub async fn run(self) {
        let Self {
            ctx,
            workload,
            mut guard,
            sink,
        } = self;
        guard.start();
        let worker = worker_label();
        on_start(&ctx, sink.as_deref(), &worker);
        let outcome = workload.run(&ctx).await;
        // The task may resume on a different worker thread.
        let worker = worker_label();
        on_end(&ctx, sink.as_deref(), &worker, outcome);
        guard.finish(outcome);
    }
}

fn on_start(ctx: &TaskContext, sink: Option<&dyn EventSink>, worker: &str) {
    info!(
        batch_id = %ctx.batch_id(),
        task_id = ctx.id(),
        mode = %ctx.mode(),
        worker = worker,
        "[TASK={}] START",
        ctx.id()
    );
    if let Some(sink) = sink {
        sink.record(build_task_event(
            ctx.batch_id(),
            ctx.id(),
            ctx.mode(),
            TaskEventKind::Start,
            worker,
        ));
    }
}

fn on_end(ctx: &TaskContext, sink: Option<&dyn EventSink>, worker: &str, outcome: TaskOutcome) {
    info!(
        batch_id = %ctx.batch_id(),
        task_id = ctx.id(),
        mode = %ctx.mode(),
        worker = worker,
        outcome = %outcome,
        "[TASK={}] END",
        ctx.id()
    );
    if let Some(sink) = sink {
        sink.record(build_task_event(
            ctx.batch_id(),
            ctx.id(),
            ctx.mode(),
            TaskEventKind::End(outcome),
            worker,
        ));
    }
}

/// Thread name, plus the tokio task id when running inside a task.
fn worker_label() -> String {
    let current = thread::current();
    let name = current.name().unwrap_or("unnamed");
    match tokio::task::try_id() {
        Some(task) => format!("{name}/task-{task}"),
        None => name.to_string(),
    }
}
