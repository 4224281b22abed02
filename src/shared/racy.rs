//! Shared containers without any synchronization

use super::{witness::OverlapWitness, IntSet, SharedSets, Side, Synchronization};
use crossbeam::utils::CachePadded;
use std::cell::UnsafeCell;

/// Pair of containers that workers read and write with no coordination at all
///
/// There is no lock and no atomic operation between a worker and the
/// containers' memory, so concurrent use from several threads is a data race.
/// Lost insertions, torn reads, inconsistent set algebra results and outright
/// memory corruption are all possible outcomes. Observing them is the purpose
/// of this type.
#[derive(Debug, Default)]
pub struct RacySets {
    /// Containers A and B, on separate cache lines
    sets: [CachePadded<UnsafeCell<IntSet>>; 2],

    /// Overlap detection
    witness: OverlapWitness,
}
//
// SAFETY: This is NOT sound. Sharing `RacySets` between threads lets them
//         mutate and read the same `HashSet` concurrently, which is undefined
//         behavior. The harness exists to expose what the program does when
//         this happens, and must only be used for that purpose.
unsafe impl Sync for RacySets {}
//
impl SharedSets for RacySets {
    const SYNCHRONIZATION: Synchronization = Synchronization::Unsynchronized;

    #[inline]
    fn insert(&self, side: Side, value: u64) {
        let _visit = self.witness.enter();
        let set = self.sets[side.index()].get();
        // SAFETY: Not guaranteed, see the `Sync` impl above
        unsafe { (*set).insert(value) };
    }

    #[inline]
    fn read<R>(&self, op: impl FnOnce([&IntSet; 2]) -> R) -> R {
        let _visit = self.witness.enter();
        let [a, b] = &self.sets;
        // SAFETY: Not guaranteed, see the `Sync` impl above
        op(unsafe { [&*a.get(), &*b.get()] })
    }

    fn overlaps(&self) -> Option<u64> {
        self.witness.overlaps()
    }
}
