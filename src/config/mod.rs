//! Configuration models for the batch runner.

pub mod runner;

pub use runner::{RunnerConfig, DEFAULT_DELAY_MS, DEFAULT_TASK_COUNT};
