//! Stress-testing harness for concurrent, unsynchronized access to shared data
//!
//! Workers run a deliberately exponential recursive computation, optionally
//! reading and mutating a pair of shared sets at every recursive step with no
//! synchronization whatsoever. Comparing concurrent runs against a serial
//! baseline, and unsynchronized containers against locked ones, tells how a
//! runtime copes with contention and data races.

#![warn(clippy::print_stdout, clippy::print_stderr, clippy::dbg_macro)]

#[cfg(feature = "bench")]
pub mod bench;
pub mod config;
pub mod driver;
pub mod report;
pub mod shared;
pub mod worker;
pub mod workload;

pub use crate::{
    config::{Completion, RunConfig, Variant},
    driver::{run_benchmark, run_serial, Summary},
    report::{Discard, Reporter, StdoutReporter},
    shared::Synchronization,
};

/// Argument of the workload generator used by every command-line variant
pub const DEFAULT_DEPTH: u64 = 30;

/// Default number of workers (or serial iterations)
pub const DEFAULT_WORKERS: usize = 7;

/// Recursion depth below which container A is always the one being mutated
const ACTIVE_A_BELOW: u64 = 15;

/// Value whose membership in the active container is probed at every step
const PROBE_VALUE: u64 = 33;

/// Extract the result or propagate the panic from a `thread::Result`
fn result_or_panic<R>(result: std::thread::Result<R>) -> R {
    match result {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}
