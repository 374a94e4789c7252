//! Integration tests for interrupting tasks mid-delay
//!
//! Interrupted tasks end early, are counted as interrupted, and never fail
//! the batch.

use prometheus_batch_runner::core::{
    BatchRunner, EventSink, InMemoryEventSink, SleepWorkload, TaskEventKind, TaskOutcome,
};
use prometheus_batch_runner::runtime::{ThreadSpawner, TokioSpawner};
use rand::seq::index::sample;
use std::sync::Arc;
use std::time::{Duration, Instant};

const LONG_DELAY: Duration = Duration::from_secs(30);

#[test]
fn test_interrupt_all_heavyweight() {
    let runner = BatchRunner::new(ThreadSpawner::new(), SleepWorkload::new(LONG_DELAY));
    let batch = runner.spawn_batch(8).expect("spawn");
    assert_eq!(batch.spawned(), 8);

    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(batch.remaining(), 8);

    let start = Instant::now();
    batch.interrupt_all();
    let report = batch.wait().expect("interrupts do not fail the batch");

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(report.tally.interrupted, 8);
    assert_eq!(report.tally.completed, 0);
}

#[test]
fn test_interrupt_single_task() {
    let sink = Arc::new(InMemoryEventSink::new(64));
    let runner = BatchRunner::new(
        ThreadSpawner::new(),
        SleepWorkload::new(Duration::from_millis(300)),
    )
    .with_event_sink(Arc::clone(&sink) as Arc<dyn EventSink>);

    let batch = runner.spawn_batch(4).expect("spawn");
    assert!(batch.interrupt(2));
    assert!(!batch.interrupt(4));
    let report = batch.wait().expect("batch");

    assert_eq!(report.tally.interrupted, 1);
    assert_eq!(report.tally.completed, 3);
    let interrupted: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|e| e.kind == TaskEventKind::End(TaskOutcome::Interrupted))
        .map(|e| e.task_id)
        .collect();
    assert_eq!(interrupted, vec![2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_interrupt_all_lightweight_async() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
    let runner = BatchRunner::new(spawner, SleepWorkload::new(LONG_DELAY));

    let batch = runner.spawn_batch(1_000).expect("spawn");
    tokio::time::sleep(Duration::from_millis(50)).await;
    batch.interrupt_all();

    let report = tokio::time::timeout(Duration::from_secs(5), batch.wait_async())
        .await
        .expect("interrupted batch joins promptly")
        .expect("batch");
    assert_eq!(report.tally.interrupted, 1_000);
}

#[test]
fn test_interrupt_random_subset_lightweight() {
    const COUNT: usize = 200;
    let spawner = TokioSpawner::with_worker_threads(2).expect("runtime");
    let runner = BatchRunner::new(spawner, SleepWorkload::new(Duration::from_secs(1)));

    let victims = sample(&mut rand::rng(), COUNT, 40);
    let batch = runner.spawn_batch(COUNT).expect("spawn");
    for id in victims.iter() {
        assert!(batch.interrupt(id));
    }
    let report = batch.wait().expect("batch");

    assert_eq!(report.tally.interrupted, 40);
    assert_eq!(report.tally.completed, COUNT - 40);
    assert_eq!(report.tally.total(), COUNT);
}
