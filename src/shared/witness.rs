//! Detection of container operations that overlap in time
//!
//! Only compiled to something non-trivial when the `detect-overlaps` feature
//! is enabled. See the Cargo manifest for a discussion of the tradeoffs.

#[cfg(feature = "detect-overlaps")]
use crossbeam::utils::CachePadded;
#[cfg(feature = "detect-overlaps")]
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counter of container operations that started while another one was still
/// in flight
#[derive(Debug, Default)]
pub struct OverlapWitness {
    /// Number of operations currently in flight
    #[cfg(feature = "detect-overlaps")]
    in_flight: CachePadded<AtomicUsize>,

    /// Number of operations that found another operation in flight
    #[cfg(feature = "detect-overlaps")]
    overlaps: CachePadded<AtomicU64>,
}
//
impl OverlapWitness {
    /// Record the start of an operation, which ends when the output is dropped
    #[inline]
    pub fn enter(&self) -> Visit<'_> {
        #[cfg(feature = "detect-overlaps")]
        self.record_entry();
        Visit(self)
    }

    /// Number of overlapping operations observed so far, if tracked
    #[cfg(feature = "detect-overlaps")]
    pub fn overlaps(&self) -> Option<u64> {
        Some(self.overlaps.load(Ordering::Relaxed))
    }

    /// Number of overlapping operations observed so far, if tracked
    #[cfg(not(feature = "detect-overlaps"))]
    pub fn overlaps(&self) -> Option<u64> {
        None
    }

    /// Bump the in-flight counter, recording an overlap if it was nonzero
    //
    // All accesses are Relaxed: the witness must not introduce any
    // happens-before edge between the operations that it observes.
    #[cfg(feature = "detect-overlaps")]
    #[inline]
    fn record_entry(&self) {
        if self.in_flight.fetch_add(1, Ordering::Relaxed) > 0 {
            self.overlaps.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Ongoing operation, as tracked by an [`OverlapWitness`]
#[derive(Debug)]
#[must_use = "the operation is considered over as soon as this is dropped"]
#[cfg_attr(not(feature = "detect-overlaps"), allow(dead_code))]
pub struct Visit<'witness>(&'witness OverlapWitness);
//
impl Drop for Visit<'_> {
    #[inline]
    fn drop(&mut self) {
        #[cfg(feature = "detect-overlaps")]
        self.0.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(all(test, feature = "detect-overlaps"))]
mod tests {
    use super::*;
    use std::sync::Barrier;

    #[test]
    fn sequential_visits() {
        let witness = OverlapWitness::default();
        for _ in 0..10 {
            let _visit = witness.enter();
        }
        assert_eq!(witness.overlaps(), Some(0));
    }

    #[test]
    fn nested_visit() {
        let witness = OverlapWitness::default();
        let outer = witness.enter();
        {
            let _inner = witness.enter();
        }
        std::mem::drop(outer);
        let _after = witness.enter();
        assert_eq!(witness.overlaps(), Some(1));
    }

    #[test]
    fn concurrent_visits() {
        let witness = OverlapWitness::default();
        let entered = Barrier::new(2);
        let checked = Barrier::new(2);
        std::thread::scope(|s| {
            s.spawn(|| {
                let _visit = witness.enter();
                entered.wait();
                checked.wait();
            });
            entered.wait();
            {
                let _visit = witness.enter();
            }
            checked.wait();
        });
        assert_eq!(witness.overlaps(), Some(1));
    }
}
