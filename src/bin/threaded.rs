//! Concurrent benchmark: background workers plus one worker on the main thread

use clap::Parser;
use contention::{config::count_from_arg, run_benchmark, Completion, RunConfig, StdoutReporter};
use std::{io, sync::Arc};

/// Run the workload on several threads at once and print each result
///
/// All workers but one run on background threads, the last one runs on the
/// main thread. By default, the program exits as soon as the main thread's
/// worker is done, whether or not background workers have finished.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Number of workers
    #[arg(default_value_t = 7, allow_negative_numbers = true)]
    workers: i64,

    /// Wait for background workers before exiting
    #[arg(long)]
    join: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = RunConfig {
        completion: if args.join {
            Completion::Join
        } else {
            Completion::Detached
        },
        ..RunConfig::with_workers(count_from_arg(args.workers))
    };
    run_benchmark(&config, Arc::new(StdoutReporter))?;
    Ok(())
}
