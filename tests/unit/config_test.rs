//! Tests for configuration validation

use std::collections::HashMap;
use std::time::Duration;

use prometheus_batch_runner::config::{RunnerConfig, DEFAULT_DELAY_MS, DEFAULT_TASK_COUNT};
use prometheus_batch_runner::core::ConcurrencyMode;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = RunnerConfig::default();
    assert_eq!(cfg.mode, ConcurrencyMode::Heavyweight);
    assert_eq!(cfg.task_count, DEFAULT_TASK_COUNT);
    assert_eq!(cfg.delay(), Duration::from_millis(DEFAULT_DELAY_MS));
    assert_eq!(cfg.thread_name_prefix, "platform-worker");
    assert!(cfg.validate().is_ok());
    assert!(cfg.effective_worker_threads() >= 1);
}

#[test]
fn test_invalid_task_count() {
    let cfg = RunnerConfig::new().with_task_count(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_worker_threads() {
    let cfg = RunnerConfig::new().with_worker_threads(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_stack_size() {
    let cfg = RunnerConfig::new().with_thread_stack_size(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_builder_methods() {
    let cfg = RunnerConfig::new()
        .with_mode(ConcurrencyMode::Lightweight)
        .with_task_count(42)
        .with_delay(Duration::from_millis(250))
        .with_worker_threads(3);
    assert_eq!(cfg.mode, ConcurrencyMode::Lightweight);
    assert_eq!(cfg.task_count, 42);
    assert_eq!(cfg.delay_ms, 250);
    assert_eq!(cfg.effective_worker_threads(), 3);
}

#[test]
fn test_from_json() {
    let json = r#"{
        "mode": "lightweight",
        "task_count": 10000,
        "delay_ms": 100,
        "worker_threads": 4
    }"#;

    let cfg = RunnerConfig::from_json_str(json).expect("valid config");
    assert_eq!(cfg.mode, ConcurrencyMode::Lightweight);
    assert_eq!(cfg.task_count, 10_000);
    assert_eq!(cfg.delay_ms, 100);
    assert_eq!(cfg.worker_threads, Some(4));
    assert_eq!(cfg.thread_stack_size, None);
}

#[test]
fn test_from_json_rejects_zero_count() {
    let json = r#"{ "mode": "heavyweight", "task_count": 0 }"#;
    assert!(RunnerConfig::from_json_str(json).is_err());
}

#[test]
fn test_from_json_rejects_unknown_mode() {
    let json = r#"{ "mode": "green_threads" }"#;
    assert!(RunnerConfig::from_json_str(json).is_err());
}

#[test]
fn test_from_lookup() {
    let cfg = RunnerConfig::from_lookup(lookup(&[
        ("BATCH_MODE", "v"),
        ("BATCH_TASK_COUNT", "500"),
        ("BATCH_DELAY_MS", "20"),
        ("BATCH_STACK_SIZE", "262144"),
    ]))
    .expect("valid env");
    assert_eq!(cfg.mode, ConcurrencyMode::Lightweight);
    assert_eq!(cfg.task_count, 500);
    assert_eq!(cfg.delay_ms, 20);
    assert_eq!(cfg.thread_stack_size, Some(262_144));
}

#[test]
fn test_from_lookup_errors_name_the_variable() {
    let err = RunnerConfig::from_lookup(lookup(&[("BATCH_TASK_COUNT", "-1")])).unwrap_err();
    assert!(err.starts_with("BATCH_TASK_COUNT"), "{err}");

    let err = RunnerConfig::from_lookup(lookup(&[("BATCH_MODE", "q")])).unwrap_err();
    assert!(err.starts_with("BATCH_MODE"), "{err}");
}

#[test]
fn test_from_lookup_empty_is_default() {
    let cfg = RunnerConfig::from_lookup(|_| None).expect("defaults are valid");
    assert_eq!(cfg, RunnerConfig::default());
}
