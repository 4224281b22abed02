//! Shared containers behind a single lock

use super::{witness::OverlapWitness, IntSet, SharedSets, Side, Synchronization};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Pair of containers where every operation holds one pair-wide lock
///
/// This is the comparison point for [`RacySets`](super::RacySets): each
/// individual operation becomes atomic, but the sequence of operations that a
/// worker performs at each step is still freely interleaved with other
/// workers' operations.
#[derive(Debug, Default)]
pub struct LockedSets {
    /// Containers A and B
    sets: Mutex<[IntSet; 2]>,

    /// Overlap detection, only touched with the lock held
    witness: OverlapWitness,
}
//
impl LockedSets {
    /// Acquire the lock
    ///
    /// Container operations cannot panic midway through a modification, so a
    /// poisoned lock still guards consistent containers.
    fn lock(&self) -> MutexGuard<'_, [IntSet; 2]> {
        self.sets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
//
impl SharedSets for LockedSets {
    const SYNCHRONIZATION: Synchronization = Synchronization::Locked;

    #[inline]
    fn insert(&self, side: Side, value: u64) {
        let mut sets = self.lock();
        let _visit = self.witness.enter();
        sets[side.index()].insert(value);
    }

    #[inline]
    fn read<R>(&self, op: impl FnOnce([&IntSet; 2]) -> R) -> R {
        let sets = self.lock();
        let _visit = self.witness.enter();
        let [a, b] = &*sets;
        op([a, b])
    }

    fn overlaps(&self) -> Option<u64> {
        self.witness.overlaps()
    }
}
