//! Reporting of results

use crate::shared::Snapshot;

/// Destination for the results of a benchmark run
///
/// Background workers report from their own thread, possibly after the driver
/// has returned, so implementations must be shareable across threads.
pub trait Reporter: Send + Sync {
    /// A worker has finished its top-level computation
    fn result(&self, value: u64);

    /// Final contents of the shared containers
    fn sets(&self, snapshot: &Snapshot);
}

/// Prints one line per result to stdout, then the containers
#[derive(Copy, Clone, Debug, Default)]
pub struct StdoutReporter;
//
#[allow(clippy::print_stdout)]
impl Reporter for StdoutReporter {
    fn result(&self, value: u64) {
        println!("{value}");
    }

    fn sets(&self, snapshot: &Snapshot) {
        println!("{snapshot}");
    }
}

/// Ignores everything, used when only timings matter
#[derive(Copy, Clone, Debug, Default)]
pub struct Discard;
//
impl Reporter for Discard {
    fn result(&self, _value: u64) {}

    fn sets(&self, _snapshot: &Snapshot) {}
}
