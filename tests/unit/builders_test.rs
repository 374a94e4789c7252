//! Tests for runner builders

use std::time::Duration;

use prometheus_batch_runner::builders::{build_runner, build_spawner};
use prometheus_batch_runner::config::RunnerConfig;
use prometheus_batch_runner::core::{BatchError, ConcurrencyMode};

#[test]
fn test_build_heavyweight_runner() {
    let cfg = RunnerConfig::new()
        .with_mode(ConcurrencyMode::Heavyweight)
        .with_thread_stack_size(256 * 1024)
        .with_delay(Duration::from_millis(1));
    let runner = build_runner(&cfg).expect("runner");
    assert_eq!(runner.mode(), ConcurrencyMode::Heavyweight);

    let report = runner.run_batch(4).expect("batch");
    assert_eq!(report.tally.completed, 4);
}

#[test]
fn test_build_lightweight_spawner() {
    let cfg = RunnerConfig::new()
        .with_mode(ConcurrencyMode::Lightweight)
        .with_worker_threads(2);
    let spawner = build_spawner(&cfg).expect("spawner");
    assert_eq!(spawner.mode(), ConcurrencyMode::Lightweight);
}

#[test]
fn test_build_rejects_invalid_config() {
    let cfg = RunnerConfig::new().with_task_count(0);
    assert!(matches!(
        build_runner(&cfg),
        Err(BatchError::InvalidArgument(_))
    ));
}
