//! Concurrency driver
//!
//! Runs workers either concurrently, with N-1 background threads plus one
//! inline worker on the calling thread, or one after another on the calling
//! thread to provide a contention-free baseline.

use crate::{
    config::{Completion, RunConfig, Variant},
    report::Reporter,
    shared::{LockedSets, RacySets, SetPair, SharedSets, Snapshot, Synchronization},
    worker::{PlainRoutine, Routine, SharedSetRoutine},
};
use log::{debug, info, trace};
use std::{
    convert::Infallible,
    io,
    sync::Arc,
    thread::JoinHandle,
    time::{Duration, Instant},
};

/// Outcome of a benchmark run, as seen from the calling thread
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Results of the workers that ran on the calling thread
    ///
    /// This is the inline worker's result for concurrent runs (if any worker
    /// was requested), and every iteration's result for serial runs.
    pub results: Vec<u64>,

    /// Number of background workers that were waited for
    pub joined: usize,

    /// Number of background workers that may still be running
    pub detached: usize,

    /// Time spent running the workers on the calling thread
    pub elapsed: Duration,

    /// Contents of the shared containers once the calling thread was done
    pub sets: Option<Snapshot>,

    /// Number of overlapping container operations observed, if tracked
    pub overlaps: Option<u64>,
}

/// Run `config.workers` workers concurrently
///
/// `config.workers - 1` workers are spawned on background threads, then one
/// more runs on the calling thread. Depending on `config.completion`,
/// background workers are either waited for or left running. Every worker
/// reports its own result as soon as it is done, and the final contents of
/// the shared containers (if any) are reported once the calling thread is
/// done.
pub fn run_benchmark(config: &RunConfig, reporter: Arc<dyn Reporter>) -> io::Result<Summary> {
    info!("Running {config:?} concurrently");
    match (config.variant, config.synchronization) {
        (Variant::Plain, _) => {
            let routine = PlainRoutine {
                depth: config.depth,
            };
            run_concurrent(&routine, config, &reporter)
        }
        (Variant::SharedSets, Synchronization::Unsynchronized) => {
            with_sets::<RacySets, _>(config, &reporter, |routine| {
                run_concurrent(routine, config, &reporter)
            })
        }
        (Variant::SharedSets, Synchronization::Locked) => {
            with_sets::<LockedSets, _>(config, &reporter, |routine| {
                run_concurrent(routine, config, &reporter)
            })
        }
    }
}

/// Run `config.workers` workers one after another on the calling thread
pub fn run_serial(config: &RunConfig, reporter: Arc<dyn Reporter>) -> Summary {
    info!("Running {config:?} serially");
    let result: Result<Summary, Infallible> = match (config.variant, config.synchronization) {
        (Variant::Plain, _) => {
            let routine = PlainRoutine {
                depth: config.depth,
            };
            Ok(serial(&routine, config, &reporter))
        }
        (Variant::SharedSets, Synchronization::Unsynchronized) => {
            with_sets::<RacySets, _>(config, &reporter, |routine| {
                Ok(serial(routine, config, &reporter))
            })
        }
        (Variant::SharedSets, Synchronization::Locked) => {
            with_sets::<LockedSets, _>(config, &reporter, |routine| {
                Ok(serial(routine, config, &reporter))
            })
        }
    };
    match result {
        Ok(summary) => summary,
        Err(never) => match never {},
    }
}

/// Set up shared containers, run workers against them, then report the
/// containers' contents
fn with_sets<S: SharedSets, E>(
    config: &RunConfig,
    reporter: &Arc<dyn Reporter>,
    drive: impl FnOnce(&SharedSetRoutine<S>) -> Result<Summary, E>,
) -> Result<Summary, E> {
    let routine = SharedSetRoutine {
        depth: config.depth,
        sets: Arc::new(SetPair::<S>::new()),
    };
    let mut summary = drive(&routine)?;

    // Background workers may still be mutating the containers at this point
    let snapshot = routine.sets.snapshot();
    reporter.sets(&snapshot);
    summary.sets = Some(snapshot);

    summary.overlaps = routine.sets.overlaps();
    if let Some(overlaps) = summary.overlaps {
        info!(
            "Observed {overlaps} overlapping {:?} container operations",
            S::SYNCHRONIZATION
        );
    }
    Ok(summary)
}

/// Concurrent execution of a particular routine
fn run_concurrent<R: Routine>(
    routine: &R,
    config: &RunConfig,
    reporter: &Arc<dyn Reporter>,
) -> io::Result<Summary> {
    // Start background workers
    let num_background = config.workers.saturating_sub(1);
    debug!("Spawning {num_background} background worker(s)");
    let mut handles = Vec::new();
    for worker_idx in 0..num_background {
        let handle = spawn_worker(worker_idx, routine.clone(), reporter.clone())?;
        match config.completion {
            Completion::Join => handles.push(handle),
            Completion::Detached => std::mem::drop(handle),
        }
    }

    // Run the inline worker, if any
    let start = Instant::now();
    let mut results = Vec::with_capacity(1);
    if config.workers > 0 {
        let result = routine.run();
        reporter.result(result);
        results.push(result);
    }
    let elapsed = start.elapsed();
    info!("Inline worker finished after {elapsed:?}");

    // Wait for background workers if requested
    let joined = handles.len();
    for handle in handles {
        crate::result_or_panic(handle.join());
    }
    if joined > 0 {
        debug!(
            "All {joined} background worker(s) finished after {:?}",
            start.elapsed()
        );
    }
    let detached = num_background - joined;
    if detached > 0 {
        debug!("{detached} background worker(s) may still be running");
    }

    Ok(Summary {
        results,
        joined,
        detached,
        elapsed,
        ..Summary::default()
    })
}

/// Serial execution of a particular routine
fn serial<R: Routine>(routine: &R, config: &RunConfig, reporter: &Arc<dyn Reporter>) -> Summary {
    let start = Instant::now();
    let results = (0..config.workers)
        .map(|iteration| {
            let result = routine.run();
            trace!("Iteration #{iteration} finished after {:?}", start.elapsed());
            reporter.result(result);
            result
        })
        .collect::<Vec<_>>();
    let elapsed = start.elapsed();
    info!("{} serial iteration(s) finished after {elapsed:?}", results.len());
    Summary {
        results,
        elapsed,
        ..Summary::default()
    }
}

/// Start one background worker
fn spawn_worker<R: Routine>(
    worker_idx: usize,
    routine: R,
    reporter: Arc<dyn Reporter>,
) -> io::Result<JoinHandle<u64>> {
    std::thread::Builder::new()
        .name(format!("Benchmark worker #{worker_idx}"))
        .spawn(move || {
            let start = Instant::now();
            let result = routine.run();
            trace!("Background worker #{worker_idx} finished after {:?}", start.elapsed());
            reporter.result(result);
            result
        })
}
