use contention::{bench, run_benchmark, run_serial, Discard};
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn criterion_benchmark(c: &mut Criterion) {
    bench::for_each_configuration(|name, config| {
        bench::bench_worker_counts(c, &format!("{name}/serial"), config, |config| {
            criterion::black_box(run_serial(config, Arc::new(Discard)));
        });
        bench::bench_worker_counts(c, &format!("{name}/concurrent"), config, |config| {
            criterion::black_box(
                run_benchmark(config, Arc::new(Discard)).expect("failed to spawn workers"),
            );
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
