//! Serial baseline: the same work as the concurrent benchmark, one worker at
//! a time, with no contention

use clap::Parser;
use contention::{config::count_from_arg, run_serial, RunConfig, StdoutReporter, Variant};
use std::sync::Arc;

/// Run the workload several times in a row and print each result
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Number of iterations
    #[arg(default_value_t = 7, allow_negative_numbers = true)]
    iterations: i64,

    /// Run the shared-set workload and print the containers at the end
    #[arg(long)]
    shared_sets: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = RunConfig {
        variant: if args.shared_sets {
            Variant::SharedSets
        } else {
            Variant::Plain
        },
        ..RunConfig::with_workers(count_from_arg(args.iterations))
    };
    run_serial(&config, Arc::new(StdoutReporter));
}
