//! Concurrent benchmark where every worker hammers two shared sets without
//! any synchronization

use clap::Parser;
use contention::{
    config::count_from_arg, run_benchmark, Completion, RunConfig, StdoutReporter,
    Synchronization, Variant,
};
use std::{io, sync::Arc};

/// Run the shared-set workload on several threads at once, print each result,
/// then print the final contents of both sets
///
/// Unless `--locked` is passed, nothing prevents workers from accessing the
/// sets concurrently. Corrupted sets, inconsistent output and crashes are all
/// possible outcomes of running this program with more than one worker.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Number of workers
    #[arg(default_value_t = 7, allow_negative_numbers = true)]
    workers: i64,

    /// Wait for background workers before printing the sets and exiting
    #[arg(long)]
    join: bool,

    /// Guard every set operation with a lock, for comparison purposes
    #[arg(long)]
    locked: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = RunConfig {
        variant: Variant::SharedSets,
        synchronization: if args.locked {
            Synchronization::Locked
        } else {
            Synchronization::Unsynchronized
        },
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
