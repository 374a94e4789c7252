//! Tests for spawner implementations

use std::time::Duration;

use prometheus_batch_runner::core::{BatchError, BatchRunner, ConcurrencyMode, SleepWorkload, Spawn};
use prometheus_batch_runner::runtime::{ThreadSpawner, TokioSpawner};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_on_current_runtime() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
    assert_eq!(spawner.mode(), ConcurrencyMode::Lightweight);

    let runner = BatchRunner::new(spawner, SleepWorkload::new(Duration::from_millis(5)));
    let report = runner.run_batch_async(50).await.expect("batch");
    assert_eq!(report.tally.completed, 50);
}

#[test]
fn test_tokio_spawner_owned_runtime() {
    let spawner = TokioSpawner::with_worker_threads(2).expect("runtime");
    let runner = BatchRunner::new(spawner, SleepWorkload::new(Duration::from_millis(5)));
    let report = runner.run_batch(20).expect("batch");
    assert_eq!(report.mode, ConcurrencyMode::Lightweight);
    assert_eq!(report.tally.completed, 20);
}

#[test]
fn test_tokio_spawner_rejects_zero_workers() {
    assert!(matches!(
        TokioSpawner::with_worker_threads(0),
        Err(BatchError::InvalidArgument(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_owned_runtime_can_drop_inside_async() {
    let spawner = TokioSpawner::with_worker_threads(1).expect("runtime");
    drop(spawner);
}

#[test]
fn test_thread_spawner_settings() {
    let spawner = ThreadSpawner::new()
        .with_stack_size(128 * 1024)
        .with_name_prefix("demo");
    assert_eq!(spawner.mode(), ConcurrencyMode::Heavyweight);
    assert_eq!(spawner.stack_size(), Some(128 * 1024));
}
