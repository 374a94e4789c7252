//! `batch-runner` command-line entry point.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use prometheus_batch_runner::builders::build_runner;
use prometheus_batch_runner::config::RunnerConfig;
use prometheus_batch_runner::core::{compare_modes, parse_task_count, AppResult, ConcurrencyMode};
use prometheus_batch_runner::util::{init_tracing_with_default, StatusFile};

#[derive(Debug, Parser)]
#[command(name = "batch-runner", version)]
#[command(about = "Time a batch of sleeping tasks on OS threads or lightweight tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one batch and print the total elapsed time
    Run(RunArgs),
    /// Run the same batch in both modes and print memory checkpoints
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// 'p' (platform/heavyweight) or 'v' (virtual/lightweight)
    #[arg(value_name = "MODE")]
    mode: Option<String>,
    /// Number of tasks, greater than 0
    #[arg(value_name = "COUNT", allow_hyphen_values = true)]
    count: Option<String>,
    #[command(flatten)]
    tuning: TuningArgs,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Number of tasks per mode
    #[arg(long, default_value_t = 500)]
    count: usize,
    #[command(flatten)]
    tuning: TuningArgs,
    /// File updated with the number of active lightweight tasks
    #[arg(long)]
    status_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct TuningArgs {
    /// Per-task delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Tokio worker threads for lightweight mode
    #[arg(long)]
    worker_threads: Option<usize>,
    /// Stack size in KiB for heavyweight threads
    #[arg(long)]
    stack_size_kb: Option<usize>,
}

impl TuningArgs {
    fn apply(&self, mut cfg: RunnerConfig) -> RunnerConfig {
        if let Some(delay_ms) = self.delay_ms {
            cfg.delay_ms = delay_ms;
        }
        if let Some(threads) = self.worker_threads {
            cfg.worker_threads = Some(threads);
        }
        if let Some(kb) = self.stack_size_kb {
            cfg.thread_stack_size = Some(kb.saturating_mul(1024));
        }
        cfg
    }
}

fn load_config() -> AppResult<RunnerConfig> {
    RunnerConfig::from_env().map_err(|e| anyhow::anyhow!("invalid environment config: {e}"))
}

fn run(args: &RunArgs) -> AppResult<()> {
    let mut cfg = args.tuning.apply(load_config()?);
    if let Some(mode) = &args.mode {
        cfg.mode = mode.parse::<ConcurrencyMode>()?;
    }
    if let Some(count) = &args.count {
        cfg.task_count = parse_task_count(count)?;
    }

    let runner = build_runner(&cfg)?;
    tracing::info!(mode = %cfg.mode, count = cfg.task_count, delay_ms = cfg.delay_ms, "Starting tasks");
    let report = runner.run_batch(cfg.task_count)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn compare(args: &CompareArgs) -> AppResult<()> {
    let cfg = args
        .tuning
        .apply(load_config()?)
        .with_task_count(parse_task_count(&args.count.to_string())?);
    let status = args.status_file.as_ref().map(StatusFile::new);

    println!("=== Heavyweight threads vs lightweight tasks ===");
    println!("Tasks per mode: {}  delay: {}ms", cfg.task_count, cfg.delay_ms);
    println!("PID: {}", std::process::id());

    for result in compare_modes(&cfg, status.as_ref())? {
        println!();
        println!("{result}");
    }
    Ok(())
}

fn main() -> AppResult<()> {
    init_tracing_with_default("info");
    match Cli::parse().command {
        Command::Run(args) => run(&args),
        Command::Compare(args) => compare(&args),
    }
}
