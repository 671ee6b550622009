//! Line pipeline runner binary.
//!
//! Loads configuration, initializes tracing, and runs a pipeline reading lines from the
//! configured source, transforming them on a pool of workers and writing them to the configured
//! sink. Ctrl+C shuts the pipeline down.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use telemetry::tracing::init_tracing;
use tokio::runtime::Runtime;
use tracing::error;

use crate::config::{ConfigOverrides, RunnerConfig, load_runner_config};
use crate::core::start_runner_with_config;
use crate::error::{RunnerError, RunnerResult};

mod config;
mod core;
mod error;

/// Longest time the runtime waits for blocking tasks once the pipeline is done.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(name = "runner", version, about)]
struct RunnerArgs {
    /// Number of transform workers
    #[arg(long)]
    workers: Option<usize>,

    /// File to read lines from, replacing the configured source
    #[arg(long)]
    input: Option<PathBuf>,

    /// File to write lines to, replacing the configured sink
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory holding the configuration files, `./configuration` by default
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = RunnerArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", err.render_report());
            ExitCode::FAILURE
        }
    }
}

fn run(args: RunnerArgs) -> RunnerResult<()> {
    let overrides = ConfigOverrides {
        workers: args.workers,
        input: args.input,
        output: args.output,
    };
    let runner_config = load_runner_config(args.config_dir.as_deref(), overrides)?;

    let _log_flusher = init_tracing(env!("CARGO_BIN_NAME")).map_err(RunnerError::config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    block_on_and_release(runtime, async_main(runner_config))
}

/// Runs `future` to completion, then shuts `runtime` down without waiting for blocking tasks
/// longer than [`RUNTIME_SHUTDOWN_TIMEOUT`].
///
/// A read on standard input runs on a blocking thread that cannot be cancelled, so after Ctrl+C
/// it would otherwise keep the process alive until the input is closed.
fn block_on_and_release<F: Future>(runtime: Runtime, future: F) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);

    output
}

async fn async_main(runner_config: RunnerConfig) -> RunnerResult<()> {
    if let Err(err) = start_runner_with_config(runner_config).await {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}
