//! Worker routines
//!
//! A worker is one thread of execution (or one iteration of the serial
//! baseline) that runs a routine to completion and reports its result.

use crate::{
    shared::{SetPair, SetRef, SharedSets},
    workload::fibonacci,
    ACTIVE_A_BELOW, PROBE_VALUE,
};
use std::{hint::black_box, sync::Arc};

/// Top-level computation performed by each worker
///
/// Routines are cloned once per worker, so any state that should be shared
/// between workers must be behind a shared-ownership handle.
pub trait Routine: Clone + Send + 'static {
    /// Run the computation and return its result
    fn run(&self) -> u64;
}

/// Workload generator alone, with no shared state
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlainRoutine {
    /// Argument of the workload generator
    pub depth: u64,
}
//
impl Routine for PlainRoutine {
    #[inline]
    fn run(&self) -> u64 {
        fibonacci(self.depth)
    }
}

/// Workload generator that hammers a pair of shared containers at every step
/// of its recursion
#[derive(Debug)]
pub struct SharedSetRoutine<S: SharedSets> {
    /// Argument of the workload generator
    pub depth: u64,

    /// Containers shared with every other worker
    pub sets: Arc<SetPair<S>>,
}
//
impl<S: SharedSets> Clone for SharedSetRoutine<S> {
    fn clone(&self) -> Self {
        Self {
            depth: self.depth,
            sets: self.sets.clone(),
        }
    }
}
//
impl<S: SharedSets> Routine for SharedSetRoutine<S> {
    fn run(&self) -> u64 {
        fibonacci_shared(&self.sets, self.depth)
    }
}

/// Like [`fibonacci()`], but every recursive step that combines two terms
/// also mutates one shared container and reads both
///
/// The container that gets mutated is A when `n < ACTIVE_A_BELOW` or the
/// computed term is odd, and B otherwise. This policy is arbitrary and only
/// exists to spread traffic unevenly over the two containers.
pub fn fibonacci_shared<S: SharedSets>(sets: &SetPair<S>, n: u64) -> u64 {
    if n < 2 {
        return 1;
    }
    let res = fibonacci_shared(sets, n - 1) + fibonacci_shared(sets, n - 2);
    if n < ACTIVE_A_BELOW || res % 2 == 1 {
        exercise(sets, sets.a(), sets.b(), res);
    } else {
        exercise(sets, sets.b(), sets.a(), res);
    }
    res
}

/// Insert `value` into the `active` container, then run the full battery of
/// read-only operations with `reference` as the subject
///
/// The membership check always targets container A, whichever container is
/// active. Read results are discarded: they only exist to generate read
/// traffic.
#[inline]
fn exercise<S: SharedSets>(
    sets: &SetPair<S>,
    active: SetRef<'_, S>,
    reference: SetRef<'_, S>,
    value: u64,
) {
    active.add(value);
    black_box(reference.is_subset_of(&active));
    black_box(reference.is_superset_of(&active));
    black_box(reference.difference(&active));
    black_box(reference.symmetric_difference(&active));
    black_box(sets.a().contains(PROBE_VALUE));
    black_box(reference.intersection(&active));
    black_box(reference.copy());
}
