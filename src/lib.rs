//! # Prometheus Batch Runner
//!
//! Fan out a batch of identical tasks, join them behind a barrier, and time the
//! batch. Each batch runs in one of two scheduling modes:
//!
//! - **Heavyweight**: one dedicated OS thread (and stack) per task, preemptively
//!   scheduled by the kernel.
//! - **Lightweight**: one tokio task per task, cooperatively multiplexed over a
//!   small pool of worker threads.
//!
//! With a sleep-based workload the elapsed time of a batch stays close to the
//! per-task delay as long as every task can be suspended at once. Lightweight
//! batches of tens of thousands of tasks cost little memory; heavyweight batches
//! of the same size pay a stack per task and can hit OS thread limits.
//!
//! ## Running a batch
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use prometheus_batch_runner::core::{run_batch, ConcurrencyMode};
//!
//! let elapsed = run_batch(10_000, ConcurrencyMode::Lightweight, Duration::from_millis(100))?;
//! println!("Total time: {}ms", elapsed.as_millis());
//! ```
//!
//! ## Interrupting tasks
//!
//! ```rust,ignore
//! use prometheus_batch_runner::builders::build_runner;
//! use prometheus_batch_runner::config::RunnerConfig;
//!
//! let runner = build_runner(&RunnerConfig::from_env()?)?;
//! let batch = runner.spawn_batch(100)?;
//! batch.interrupt(7);
//! let report = batch.wait()?;
//! assert_eq!(report.tally.total(), 100);
//! ```
//!
//! Interrupted tasks end early and are counted in the report's tally; they do
//! not fail the batch.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core batch abstractions, the join barrier and the runner.
pub mod core;
/// Configuration models for the runner.
pub mod config;
/// Builders to construct runners from configuration.
pub mod builders;
/// Runtime adapters for heavyweight and lightweight spawning.
pub mod runtime;
/// Shared utilities.
pub mod util;
