//! Tests for utility functions

use prometheus_batch_runner::util::{init_tracing, now_ms, ProcessMemory, StatusFile};

#[test]
fn test_now_ms_is_after_epoch() {
    assert!(now_ms() > 1_600_000_000_000);
}

#[test]
fn test_status_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let status = StatusFile::new(dir.path().join("virtual_threads.state"));

    status.write(500).expect("write");
    assert_eq!(status.read().expect("read"), 500);

    status.write(0).expect("write");
    assert_eq!(std::fs::read_to_string(status.path()).unwrap(), "0");
}

#[test]
fn test_status_file_write_or_warn_swallows_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let status = StatusFile::new(dir.path().join("missing").join("state"));
    status.write_or_warn(3);
    assert!(status.read().is_err());
}

#[test]
fn test_process_memory_display() {
    let mem = ProcessMemory {
        rss_kb: Some(4096),
        virtual_kb: None,
        threads: Some(3),
    };
    let line = mem.to_string();
    assert!(line.contains("4 MB"), "{line}");
    assert!(line.contains("n/a"), "{line}");
    assert!(line.contains("threads      3"), "{line}");
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    assert!(tracing::dispatcher::has_been_set());
}
