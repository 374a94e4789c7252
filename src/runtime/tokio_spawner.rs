//! Tokio runtime spawner implementation (lightweight mode).

use tokio::runtime::{Handle, Runtime};
use tracing::debug;

use crate::core::{BatchError, ConcurrencyMode, Spawn, TaskJob};

/// Runtime owned by a spawner. Shut down in the background on drop so the
/// spawner can be dropped from inside async code.
struct OwnedRuntime(Option<Runtime>);

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

/// Tokio-based spawner that runs each task as a lightweight tokio task.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: Handle,
    _runtime: Option<std::sync::Arc<OwnedRuntime>>,
}

impl TokioSpawner {
    /// Create a `TokioSpawner` from an existing tokio runtime handle.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self {
            handle,
            _runtime: None,
        }
    }

    /// Create a `TokioSpawner` owning a new multi-threaded runtime with
    /// `worker_threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Runtime`] if the runtime cannot be built, or
    /// [`BatchError::InvalidArgument`] if `worker_threads` is zero.
    pub fn with_worker_threads(worker_threads: usize) -> Result<Self, BatchError> {
        if worker_threads == 0 {
            return Err(BatchError::invalid("worker_threads must be greater than 0"));
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads)
            .thread_name("lightweight-carrier")
            .enable_all()
            .build()
            .map_err(BatchError::Runtime)?;
        debug!(worker_threads = worker_threads, "Lightweight runtime started");
        Ok(Self {
            handle: runtime.handle().clone(),
            _runtime: Some(std::sync::Arc::new(OwnedRuntime(Some(runtime)))),
        })
    }

    /// Handle of the runtime tasks are spawned on.
    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Spawn for TokioSpawner {
    fn mode(&self) -> ConcurrencyMode {
        ConcurrencyMode::Lightweight
    }

    fn spawn(&self, job: TaskJob) -> Result<(), BatchError> {
        // Detached: the batch barrier is the join point.
        drop(self.handle.spawn(job.run()));
        Ok(())
    }
}
