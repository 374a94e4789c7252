//! Tests for error types

use prometheus_batch_runner::core::BatchError;

#[test]
fn test_invalid_argument_error() {
    let err = BatchError::invalid("task count must be greater than 0");
    assert_eq!(
        format!("{}", err),
        "invalid argument: task count must be greater than 0"
    );
}

#[test]
fn test_spawn_error() {
    let err = BatchError::Spawn {
        task_id: 7,
        source: std::io::Error::new(std::io::ErrorKind::WouldBlock, "no threads left"),
    };
    assert_eq!(format!("{}", err), "failed to spawn task 7: no threads left");
}

#[test]
fn test_partial_spawn_error() {
    let err = BatchError::PartialSpawn {
        spawned: 3,
        requested: 10,
        source: std::io::Error::new(std::io::ErrorKind::OutOfMemory, "stack"),
    };
    assert_eq!(format!("{}", err), "spawned only 3 of 10 tasks: stack");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_runtime_error() {
    let err = BatchError::Runtime(std::io::Error::new(std::io::ErrorKind::Other, "epoll"));
    assert_eq!(format!("{}", err), "failed to build runtime: epoll");
}
