//! Side-by-side run of the same batch in both modes with memory checkpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builders::build_runner;
use crate::config::RunnerConfig;
use crate::core::{BatchError, BatchReport, ConcurrencyMode};
use crate::util::{ProcessMemory, StatusFile};

/// Process memory at one point of a mode's run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCheckpoint {
    /// Where in the run the snapshot was taken.
    pub label: String,
    /// Captured counters.
    pub memory: ProcessMemory,
}

impl MemoryCheckpoint {
    fn capture(label: &str) -> Self {
        Self {
            label: label.to_string(),
            memory: ProcessMemory::capture(),
        }
    }
}

/// Result of running one mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeComparison {
    /// Mode exercised.
    pub mode: ConcurrencyMode,
    /// Before the backend exists, once it is built, while tasks sleep, and
    /// after join and teardown.
    pub checkpoints: Vec<MemoryCheckpoint>,
    /// Batch report.
    pub report: BatchReport,
}

impl fmt::Display for ModeComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ###", self.mode)?;
        for checkpoint in &self.checkpoints {
            writeln!(f, "  {:<14} {}", checkpoint.label, checkpoint.memory)?;
        }
        write!(f, "  {}", self.report)
    }
}

/// Order in which modes are compared.
const MODES: [ConcurrencyMode; 2] = [ConcurrencyMode::Heavyweight, ConcurrencyMode::Lightweight];

/// Run `cfg.task_count` tasks in heavyweight then lightweight mode, capturing
/// memory before and after the backend is built, while the tasks sleep, and
/// after the backend is torn down. `cfg.mode` is ignored.
///
/// When `status` is given it holds `cfg.task_count` while the lightweight batch
/// runs and `0` otherwise. Status write failures are logged, not returned.
///
/// # Errors
///
/// Returns the first runner construction or batch error.
pub fn compare_modes(
    cfg: &RunnerConfig,
    status: Option<&StatusFile>,
) -> Result<Vec<ModeComparison>, BatchError> {
    if let Some(status) = status {
        status.write_or_warn(0);
    }

    let mut results = Vec::with_capacity(MODES.len());
    for mode in MODES {
        let mode_cfg = cfg.clone().with_mode(mode);
        let baseline = MemoryCheckpoint::capture("baseline");
        let runner = build_runner(&mode_cfg)?;
        let ready = MemoryCheckpoint::capture("runner ready");

        let batch = runner.spawn_batch(mode_cfg.task_count)?;
        let lightweight_status = status.filter(|_| mode == ConcurrencyMode::Lightweight);
        if let Some(status) = lightweight_status {
            status.write_or_warn(batch.spawned());
        }
        let running = MemoryCheckpoint::capture("tasks sleeping");
        info!(mode = %mode, memory = %running.memory, "Batch in flight");

        let report = batch.wait();
        if let Some(status) = lightweight_status {
            status.write_or_warn(0);
        }
        let report = report?;

        drop(runner);
        let after = MemoryCheckpoint::capture("after join");

        results.push(ModeComparison {
            mode,
            checkpoints: vec![baseline, ready, running, after],
            report,
        });
    }
    Ok(results)
}
