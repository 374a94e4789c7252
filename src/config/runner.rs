//! Runner configuration: mode, batch size, delay and backend tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{parse_task_count, ConcurrencyMode};
use crate::runtime::thread_spawner::DEFAULT_THREAD_PREFIX;

/// Tasks per batch when none is configured.
pub const DEFAULT_TASK_COUNT: usize = 1000;
/// Per-task delay in milliseconds when none is configured.
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Environment variable selecting the mode.
pub const ENV_MODE: &str = "BATCH_MODE";
/// Environment variable holding the task count.
pub const ENV_TASK_COUNT: &str = "BATCH_TASK_COUNT";
/// Environment variable holding the delay in milliseconds.
pub const ENV_DELAY_MS: &str = "BATCH_DELAY_MS";
/// Environment variable holding the lightweight worker thread count.
pub const ENV_WORKER_THREADS: &str = "BATCH_WORKER_THREADS";
/// Environment variable holding the heavyweight stack size in bytes.
pub const ENV_STACK_SIZE: &str = "BATCH_STACK_SIZE";

fn default_task_count() -> usize {
    DEFAULT_TASK_COUNT
}

const fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_thread_name_prefix() -> String {
    DEFAULT_THREAD_PREFIX.to_string()
}

/// Batch runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Scheduling mode.
    #[serde(default)]
    pub mode: ConcurrencyMode,
    /// Tasks per batch.
    #[serde(default = "default_task_count")]
    pub task_count: usize,
    /// Per-task delay in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Tokio worker threads for lightweight mode. Defaults to the CPU count.
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Stack size in bytes for heavyweight threads. Defaults to the platform's.
    #[serde(default)]
    pub thread_stack_size: Option<usize>,
    /// Name prefix for heavyweight threads.
    #[serde(default = "default_thread_name_prefix")]
    pub thread_name_prefix: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: ConcurrencyMode::default(),
            task_count: DEFAULT_TASK_COUNT,
            delay_ms: DEFAULT_DELAY_MS,
            worker_threads: None,
            thread_stack_size: None,
            thread_name_prefix: default_thread_name_prefix(),
        }
    }
}

impl RunnerConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ConcurrencyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the task count.
    #[must_use]
    pub const fn with_task_count(mut self, count: usize) -> Self {
        self.task_count = count;
        self
    }

    /// Set the per-task delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the lightweight worker thread count.
    #[must_use]
    pub const fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Set the heavyweight thread stack size in bytes.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }

    /// Per-task delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Lightweight worker threads, resolving the CPU-count default.
    #[must_use]
    pub fn effective_worker_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(num_cpus::get)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.task_count == 0 {
            return Err("task_count must be greater than 0".into());
        }
        if self.worker_threads == Some(0) {
            return Err("worker_threads must be greater than 0".into());
        }
        if self.thread_stack_size == Some(0) {
            return Err("thread_stack_size must be greater than 0".into());
        }
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment, reading `.env` first if present.
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a message naming the variable that failed to parse or validate.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a message naming the key that failed to parse or validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut cfg = Self::default();
        if let Some(mode) = lookup(ENV_MODE) {
            cfg.mode = mode.parse().map_err(|e| format!("{ENV_MODE}: {e}"))?;
        }
        if let Some(count) = lookup(ENV_TASK_COUNT) {
            cfg.task_count =
                parse_task_count(&count).map_err(|e| format!("{ENV_TASK_COUNT}: {e}"))?;
        }
        if let Some(delay) = lookup(ENV_DELAY_MS) {
            cfg.delay_ms = delay
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_DELAY_MS}: {e}"))?;
        }
        if let Some(threads) = lookup(ENV_WORKER_THREADS) {
            cfg.worker_threads = Some(
                threads
                    .trim()
                    .parse()
                    .map_err(|e| format!("{ENV_WORKER_THREADS}: {e}"))?,
            );
        }
        if let Some(stack) = lookup(ENV_STACK_SIZE) {
            cfg.thread_stack_size = Some(
                stack
                    .trim()
                    .parse()
                    .map_err(|e| format!("{ENV_STACK_SIZE}: {e}"))?,
            );
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
