//! Workload abstraction: what each task of a batch actually does.

use std::time::Duration;

use async_trait::async_trait;

use super::{SleepOutcome, TaskContext, TaskOutcome};

/// Unit of work executed by every task in a batch.
///
/// Heavyweight spawners call [`Workload::run_blocking`] on a dedicated OS
/// thread; lightweight spawners await [`Workload::run`] on the tokio runtime.
/// Implementations should honor `ctx.interrupt()` so that an interrupted task
/// ends promptly.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use prometheus_batch_runner::core::{TaskContext, TaskOutcome, Workload};
///
/// struct Noop;
///
/// #[async_trait]
/// impl Workload for Noop {
///     fn run_blocking(&self, _ctx: &TaskContext) -> TaskOutcome {
///         TaskOutcome::Completed
///     }
///
///     async fn run(&self, _ctx: &TaskContext) -> TaskOutcome {
///         TaskOutcome::Completed
///     }
/// }
/// ```
#[async_trait]
pub trait Workload: Send + Sync + 'static {
    /// Run the work on the calling OS thread, blocking it.
    fn run_blocking(&self, ctx: &TaskContext) -> TaskOutcome;

    /// Run the work as a cooperative task; suspension must yield the worker thread.
    async fn run(&self, ctx: &TaskContext) -> TaskOutcome;
}

/// Default workload: an interruptible sleep standing in for I/O-bound work.
#[derive(Debug, Clone, Copy)]
pub struct SleepWorkload {
    delay: Duration,
}

impl SleepWorkload {
    /// Sleep for `delay` in every task.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

const fn to_outcome(sleep: SleepOutcome) -> TaskOutcome {
    match sleep {
        SleepOutcome::Elapsed => TaskOutcome::Completed,
        SleepOutcome::Interrupted => TaskOutcome::Interrupted,
    }
}

#[async_trait]
impl Workload for SleepWorkload {
    fn run_blocking(&self, ctx: &TaskContext) -> TaskOutcome {
        to_outcome(ctx.interrupt().sleep_blocking(self.delay))
    }

    async fn run(&self, ctx: &TaskContext) -> TaskOutcome {
        to_outcome(ctx.interrupt().sleep(self.delay).await)
    }
}
