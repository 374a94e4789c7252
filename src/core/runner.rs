//! Batch runner: fan out N tasks, join them behind a barrier, time the batch.
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use prometheus_batch_runner::core::{BatchRunner, SleepWorkload};
//! use prometheus_batch_runner::runtime::ThreadSpawner;
//!
//! let runner = BatchRunner::new(ThreadSpawner::new(), SleepWorkload::new(Duration::from_millis(100)));
//! let report = runner.run_batch(10)?;
//! println!("{report}");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::audit::EventSink;
use super::barrier::{CompletionBarrier, CompletionGuard, OutcomeTally};
use super::spawner::{Spawn, TaskJob};
use super::{
    BatchError, BatchId, ConcurrencyMode, InterruptSignal, SleepWorkload, TaskContext, TaskId,
    Workload,
};
use crate::runtime::{ThreadSpawner, TokioSpawner};

/// Summary of a joined batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Batch identifier.
    pub batch_id: BatchId,
    /// Scheduling mode.
    pub mode: ConcurrencyMode,
    /// Tasks requested.
    pub requested: usize,
    /// Wall-clock time from before the first spawn until the last arrival.
    pub elapsed: Duration,
    /// Terminal outcomes.
    pub tally: OutcomeTally,
}

impl BatchReport {
    /// Elapsed time in whole milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "All {} {} tasks finished. Total time: {}ms",
            self.requested,
            self.mode,
            self.elapsed_ms()
        )
    }
}

/// Runs batches of identical tasks through a [`Spawn`] backend.
pub struct BatchRunner {
    spawner: Arc<dyn Spawn>,
    workload: Arc<dyn Workload>,
    sink: Option<Arc<dyn EventSink>>,
}

impl BatchRunner {
    /// Create a runner from a spawner and a workload.
    pub fn new(spawner: impl Spawn + 'static, workload: impl Workload) -> Self {
        Self::from_parts(Arc::new(spawner), Arc::new(workload))
    }

    /// Create a runner from shared components.
    #[must_use]
    pub fn from_parts(spawner: Arc<dyn Spawn>, workload: Arc<dyn Workload>) -> Self {
        Self {
            spawner,
            workload,
            sink: None,
        }
    }

    /// Attach an event sink receiving start/end events for every task.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Scheduling mode of the underlying spawner.
    #[must_use]
    pub fn mode(&self) -> ConcurrencyMode {
        self.spawner.mode()
    }

    /// Validate `count` and launch every task without waiting for them.
    ///
    /// A spawn failure does not fail this call: spawning stops, the unspawned
    /// tasks are recorded as not started, and [`RunningBatch::wait`] reports the
    /// failure after joining what did start.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] if `count` is zero. No task is
    /// spawned in that case.
    pub fn spawn_batch(&self, count: usize) -> Result<RunningBatch, BatchError> {
        if count == 0 {
            return Err(BatchError::invalid("task count must be greater than 0"));
        }

        let mode = self.mode();
        let batch_id = Uuid::new_v4();
        let barrier = Arc::new(CompletionBarrier::new(count));
        let mut interrupts = Vec::new();
        let mut spawn_error = None;

        info!(batch_id = %batch_id, mode = %mode, count = count, "Starting batch");
        let started_at = Instant::now();

        for id in 0..count {
            let interrupt = Arc::new(InterruptSignal::new());
            let ctx = TaskContext::new(id, batch_id, mode, Arc::clone(&interrupt));
            let job = TaskJob::new(
                ctx,
                Arc::clone(&self.workload),
                CompletionGuard::new(Arc::clone(&barrier)),
                self.sink.clone(),
            );
            match self.spawner.spawn(job) {
                Ok(()) => interrupts.push(interrupt),
                Err(err) => {
                    // The rejected job arrived as not started when it was dropped.
                    let unspawned = count - id - 1;
                    warn!(
                        batch_id = %batch_id,
                        task_id = id,
                        spawned = id,
                        error = %err,
                        "Spawn failed; joining tasks already running"
                    );
                    barrier.forfeit(unspawned);
                    spawn_error = Some(err);
                    break;
                }
            }
        }

        debug!(
            batch_id = %batch_id,
            spawned = interrupts.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Tasks submitted"
        );

        Ok(RunningBatch {
            batch_id,
            mode,
            requested: count,
            started_at,
            barrier,
            interrupts,
            spawn_error,
        })
    }

    /// Run a batch and block until every task has finished.
    ///
    /// # Errors
    ///
    /// See [`BatchRunner::spawn_batch`] and [`RunningBatch::wait`].
    pub fn run_batch(&self, count: usize) -> Result<BatchReport, BatchError> {
        self.spawn_batch(count)?.wait()
    }

    /// Run a batch and await every task without blocking the caller's runtime.
    ///
    /// # Errors
    ///
    /// See [`BatchRunner::spawn_batch`] and [`RunningBatch::wait_async`].
    pub async fn run_batch_async(&self, count: usize) -> Result<BatchReport, BatchError> {
        self.spawn_batch(count)?.wait_async().await
    }
}

/// Handle to a batch whose tasks have been launched.
pub struct RunningBatch {
    batch_id: BatchId,
    mode: ConcurrencyMode,
    requested: usize,
    started_at: Instant,
    barrier: Arc<CompletionBarrier>,
    interrupts: Vec<Arc<InterruptSignal>>,
    spawn_error: Option<BatchError>,
}

impl RunningBatch {
    /// Batch identifier.
    #[must_use]
    pub const fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    /// Scheduling mode.
    #[must_use]
    pub const fn mode(&self) -> ConcurrencyMode {
        self.mode
    }

    /// Tasks actually launched.
    #[must_use]
    pub fn spawned(&self) -> usize {
        self.interrupts.len()
    }

    /// Tasks that have not reached a terminal state yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.barrier.remaining()
    }

    /// Interrupt one task. Returns `false` if no such task was launched.
    pub fn interrupt(&self, id: TaskId) -> bool {
        self.interrupts.get(id).is_some_and(|signal| {
            signal.raise();
            true
        })
    }

    /// Interrupt every launched task.
    pub fn interrupt_all(&self) {
        for signal in &self.interrupts {
            signal.raise();
        }
    }

    /// Block until every task has reached a terminal state.
    ///
    /// Interrupted tasks do not fail the batch; they show up in the tally.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::PartialSpawn`] if spawning stopped early.
    pub fn wait(self) -> Result<BatchReport, BatchError> {
        let tally = self.barrier.wait();
        self.finish(tally)
    }

    /// Await every task without blocking the caller's runtime.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::PartialSpawn`] if spawning stopped early.
    pub async fn wait_async(self) -> Result<BatchReport, BatchError> {
        let tally = self.barrier.wait_async().await;
        self.finish(tally)
    }

    fn finish(self, tally: OutcomeTally) -> Result<BatchReport, BatchError> {
        let elapsed = self.started_at.elapsed();
        let spawned = self.interrupts.len();
        if let Some(err) = self.spawn_error {
            return Err(match err {
                BatchError::Spawn { source, .. } => BatchError::PartialSpawn {
                    spawned,
                    requested: self.requested,
                    source,
                },
                other => other,
            });
        }

        info!(
            batch_id = %self.batch_id,
            mode = %self.mode,
            completed = tally.completed,
            interrupted = tally.interrupted,
            panicked = tally.panicked,
            elapsed_ms = elapsed.as_millis(),
            "All tasks finished"
        );

        Ok(BatchReport {
            batch_id: self.batch_id,
            mode: self.mode,
            requested: self.requested,
            elapsed,
            tally,
        })
    }
}

/// Run `count` tasks in `mode`, each sleeping `delay`, and return the elapsed time.
///
/// Uses the default spawner for `mode`: one OS thread per task, or a tokio
/// runtime with one worker per CPU.
///
/// # Errors
///
/// Returns [`BatchError::InvalidArgument`] if `count` is zero, or a spawn or
/// runtime error from the backend.
pub fn run_batch(
    count: usize,
    mode: ConcurrencyMode,
    delay: Duration,
) -> Result<Duration, BatchError> {
    if count == 0 {
        return Err(BatchError::invalid("task count must be greater than 0"));
    }
    let workload = SleepWorkload::new(delay);
    let report = match mode {
        ConcurrencyMode::Heavyweight => {
            BatchRunner::new(ThreadSpawner::new(), workload).run_batch(count)?
        }
        ConcurrencyMode::Lightweight => {
            let spawner = TokioSpawner::with_worker_threads(num_cpus::get())?;
            BatchRunner::new(spawner, workload).run_batch(count)?
        }
    };
    Ok(report.elapsed)
}
