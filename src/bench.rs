//! Benchmarking utilities

use crate::{
    config::{Completion, RunConfig, Variant},
    shared::Synchronization,
};
use criterion::{BenchmarkId, Criterion, Throughput};
use std::sync::Once;

/// Workload depth used when benchmarking
///
/// Much lower than the command-line default, since the shared-set variant
/// performs several allocations at every recursive step and Criterion needs
/// many samples.
pub const BENCH_DEPTH: u64 = 20;

/// Worker counts at which every configuration is measured
pub const WORKER_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];

/// Run a benchmark for all interesting run configurations
///
/// Background workers are always joined so that each measured iteration
/// includes all the work it started.
pub fn for_each_configuration(mut bench: impl FnMut(&str, RunConfig)) {
    setup_logger_once();
    let base = RunConfig {
        depth: BENCH_DEPTH,
        completion: Completion::Join,
        ..RunConfig::default()
    };
    bench("plain", base);
    for (synchronization, name) in [
        (Synchronization::Unsynchronized, "shared_sets/unsynchronized"),
        (Synchronization::Locked, "shared_sets/locked"),
    ] {
        bench(
            name,
            RunConfig {
                variant: Variant::SharedSets,
                synchronization,
                ..base
            },
        );
    }
}

/// Measure some way of running a configuration at every worker count
pub fn bench_worker_counts(
    c: &mut Criterion,
    group_name: &str,
    config: RunConfig,
    mut run: impl FnMut(&RunConfig),
) {
    let mut group = c.benchmark_group(group_name);
    for workers in WORKER_COUNTS {
        let config = RunConfig { workers, ..config };
        group.throughput(Throughput::Elements(workers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(workers), &config, |b, config| {
            b.iter(|| run(config))
        });
    }
}

/// Ensure logging to stderr is set up during benchmarking
fn setup_logger_once() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        env_logger::init();
    })
}
