//! Run configuration

use crate::{shared::Synchronization, DEFAULT_DEPTH, DEFAULT_WORKERS};

/// What each worker computes
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Variant {
    /// Workload generator only, workers share nothing
    #[default]
    Plain,

    /// Workload generator that reads and mutates the shared containers at
    /// every recursive step
    SharedSets,
}

/// What the driver does with background workers once the inline worker is done
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Completion {
    /// Forget about background workers, which may still be running when
    /// results are reported and the process exits
    #[default]
    Detached,

    /// Wait for every background worker to finish
    Join,
}

/// Parameters of one benchmark run, fixed once the run has started
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct RunConfig {
    /// Argument of the workload generator
    ///
    /// Must not exceed [`MAX_DEPTH`](crate::workload::MAX_DEPTH), beyond which
    /// the computed term overflows a `u64`.
    pub depth: u64,

    /// Number of workers (number of iterations for the serial baseline)
    pub workers: usize,

    /// What each worker computes
    pub variant: Variant,

    /// How the shared containers are protected, if used
    pub synchronization: Synchronization,

    /// Whether background workers are waited for
    pub completion: Completion,
}
//
impl RunConfig {
    /// Default configuration with a specific number of workers
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}
//
impl Default for RunConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            workers: DEFAULT_WORKERS,
            variant: Variant::default(),
            synchronization: Synchronization::default(),
            completion: Completion::default(),
        }
    }
}

/// Interpret a user-provided worker or iteration count
///
/// Negative counts run no worker at all, like a count of zero.
pub fn count_from_arg(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}
