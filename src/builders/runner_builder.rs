//! Build a ready [`BatchRunner`] from a [`RunnerConfig`].

use std::sync::Arc;

use tracing::debug;

use crate::config::RunnerConfig;
use crate::core::{BatchError, BatchRunner, ConcurrencyMode, SleepWorkload, Spawn};
use crate::runtime::{ThreadSpawner, TokioSpawner};

/// Build the spawner matching `cfg.mode`.
///
/// # Errors
///
/// Returns [`BatchError::InvalidArgument`] if the config is invalid, or
/// [`BatchError::Runtime`] if the lightweight runtime cannot be built.
pub fn build_spawner(cfg: &RunnerConfig) -> Result<Arc<dyn Spawn>, BatchError> {
    cfg.validate()
        .map_err(|e| BatchError::invalid(format!("config invalid: {e}")))?;

    let spawner: Arc<dyn Spawn> = match cfg.mode {
        ConcurrencyMode::Heavyweight => {
            let mut spawner = ThreadSpawner::new().with_name_prefix(cfg.thread_name_prefix.clone());
            if let Some(bytes) = cfg.thread_stack_size {
                spawner = spawner.with_stack_size(bytes);
            }
            Arc::new(spawner)
        }
        ConcurrencyMode::Lightweight => Arc::new(TokioSpawner::with_worker_threads(
            cfg.effective_worker_threads(),
        )?),
    };
    debug!(mode = %cfg.mode, "Spawner built");
    Ok(spawner)
}

/// Build a runner whose tasks sleep for `cfg.delay_ms`.
///
/// # Errors
///
/// See [`build_spawner`].
pub fn build_runner(cfg: &RunnerConfig) -> Result<BatchRunner, BatchError> {
    let spawner = build_spawner(cfg)?;
    Ok(BatchRunner::from_parts(
        spawner,
        Arc::new(SleepWorkload::new(cfg.delay())),
    ))
}
