//! Tests for task event sinks

use prometheus_batch_runner::core::{
    build_task_event, ConcurrencyMode, EventSink, InMemoryEventSink, TaskEventKind, TaskOutcome,
};
use uuid::Uuid;

#[test]
fn test_in_memory_event_sink() {
    let sink = InMemoryEventSink::new(10);
    let batch = Uuid::new_v4();

    sink.record(build_task_event(
        batch,
        1,
        ConcurrencyMode::Heavyweight,
        TaskEventKind::Start,
        "platform-worker-1",
    ));
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].batch_id, batch);
    assert_eq!(events[0].task_id, 1);
    assert!(events[0].is_start());
    assert_eq!(events[0].worker, "platform-worker-1");
}

#[test]
fn test_event_sink_overflow() {
    let sink = InMemoryEventSink::new(2);
    let batch = Uuid::new_v4();
    let mode = ConcurrencyMode::Lightweight;

    sink.record(build_task_event(batch, 1, mode, TaskEventKind::Start, "w"));
    sink.record(build_task_event(batch, 2, mode, TaskEventKind::Start, "w"));
    sink.record(build_task_event(batch, 3, mode, TaskEventKind::Start, "w"));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].task_id, 2); // First one popped
    assert_eq!(events[1].task_id, 3);
}

#[test]
fn test_build_task_event() {
    let event = build_task_event(
        Uuid::new_v4(),
        4,
        ConcurrencyMode::Lightweight,
        TaskEventKind::End(TaskOutcome::Interrupted),
        "lightweight-carrier/task-9",
    );

    assert!(event.is_end());
    assert_eq!(event.kind, TaskEventKind::End(TaskOutcome::Interrupted));
    assert_eq!(event.mode, ConcurrencyMode::Lightweight);
    assert!(event.created_at_ms > 0);
}

#[test]
fn test_count_where() {
    let sink = InMemoryEventSink::new(16);
    let batch = Uuid::new_v4();
    let mode = ConcurrencyMode::Heavyweight;
    for id in 0..3 {
        sink.record(build_task_event(batch, id, mode, TaskEventKind::Start, "w"));
    }
    sink.record(build_task_event(
        batch,
        0,
        mode,
        TaskEventKind::End(TaskOutcome::Completed),
        "w",
    ));

    assert_eq!(sink.count_where(|e| e.is_start()), 3);
    assert_eq!(sink.count_where(|e| e.is_end()), 1);
}

#[test]
fn test_zero_capacity_sink_keeps_nothing() {
    let sink = InMemoryEventSink::new(0);
    let batch = Uuid::new_v4();

    sink.record(build_task_event(
        batch,
        0,
        ConcurrencyMode::Heavyweight,
        TaskEventKind::Start,
        "w",
    ));

    assert!(sink.events().is_empty());
    assert_eq!(sink.count_where(|_| true), 0);
}
