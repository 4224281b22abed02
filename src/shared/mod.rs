//! Pair of set-like containers shared by all workers

pub mod locked;
pub mod racy;
pub mod witness;

pub use self::{locked::LockedSets, racy::RacySets};
use std::{
    collections::{BTreeSet, HashSet},
    fmt::{self, Debug, Display},
};

/// Set of integers, as stored in the shared containers
pub type IntSet = HashSet<u64>;

/// One of the two shared containers
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    /// First container, mutated when the branch condition holds
    A,

    /// Second container, mutated otherwise
    B,
}
//
impl Side {
    /// Position of this container in per-pair tables
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Whether the shared containers are protected against concurrent access
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Synchronization {
    /// No lock, no atomics: concurrent operations race with each other
    #[default]
    Unsynchronized,

    /// A single lock makes every container operation atomic
    ///
    /// This changes the system under test and is only meant to provide a
    /// comparison point.
    Locked,
}

/// Storage for the pair of shared containers
///
/// Implementations decide how (and whether) concurrent accesses are
/// coordinated. The container operations themselves are implemented once on
/// top of this interface, see [`SetPair`].
pub trait SharedSets: Debug + Default + Send + Sync + 'static {
    /// Synchronization strategy implemented by this storage
    const SYNCHRONIZATION: Synchronization;

    /// Insert `value` into one of the containers
    fn insert(&self, side: Side, value: u64);

    /// Run a read-only operation against both containers, indexed by
    /// [`Side::index()`]
    fn read<R>(&self, op: impl FnOnce([&IntSet; 2]) -> R) -> R;

    /// Truth that `value` is present in one of the containers
    #[inline]
    fn contains(&self, side: Side, value: u64) -> bool {
        self.read(|sets| sets[side.index()].contains(&value))
    }

    /// Number of overlapping container operations observed so far, if tracked
    fn overlaps(&self) -> Option<u64>;
}

/// Pair of shared containers, named A and B
///
/// Meant to be shared by every worker of a run through an `Arc`, so that the
/// sharing is visible wherever the containers are touched.
#[derive(Debug, Default)]
pub struct SetPair<S: SharedSets> {
    /// Underlying storage
    storage: S,
}
//
impl<S: SharedSets> SetPair<S> {
    /// Set up a pair of empty containers
    pub fn new() -> Self {
        Self::default()
    }

    /// Access container A
    #[inline]
    pub fn a(&self) -> SetRef<'_, S> {
        self.side(Side::A)
    }

    /// Access container B
    #[inline]
    pub fn b(&self) -> SetRef<'_, S> {
        self.side(Side::B)
    }

    /// Access either container
    #[inline]
    pub fn side(&self, side: Side) -> SetRef<'_, S> {
        SetRef { pair: self, side }
    }

    /// Copy out the current contents of both containers
    ///
    /// With unsynchronized storage, this is as racy as any other read.
    pub fn snapshot(&self) -> Snapshot {
        self.storage.read(|[a, b]| Snapshot {
            a: a.iter().copied().collect(),
            b: b.iter().copied().collect(),
        })
    }

    /// Number of overlapping container operations observed so far, if tracked
    pub fn overlaps(&self) -> Option<u64> {
        self.storage.overlaps()
    }

    /// Underlying storage, for tests that instrument it
    #[cfg(test)]
    pub(crate) fn storage_for_test(&self) -> &S {
        &self.storage
    }
}

/// Handle to one of the containers of a [`SetPair`]
#[derive(Debug)]
pub struct SetRef<'pair, S: SharedSets> {
    /// Pair that the container belongs to
    pair: &'pair SetPair<S>,

    /// Which container of the pair this is
    side: Side,
}
//
impl<S: SharedSets> Clone for SetRef<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}
//
impl<S: SharedSets> Copy for SetRef<'_, S> {}
//
impl<'pair, S: SharedSets> SetRef<'pair, S> {
    /// Which container this is
    pub fn side(&self) -> Side {
        self.side
    }

    /// Insert a value
    #[inline]
    pub fn add(&self, value: u64) {
        self.pair.storage.insert(self.side, value)
    }

    /// Truth that a value is present
    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        self.pair.storage.contains(self.side, value)
    }

    /// Truth that every value of this container is in `other`
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.read_with(other, |this, other| this.is_subset(other))
    }

    /// Truth that every value of `other` is in this container
    #[inline]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.read_with(other, |this, other| this.is_superset(other))
    }

    /// Values of this container that are not in `other`
    #[inline]
    pub fn difference(&self, other: &Self) -> IntSet {
        self.read_with(other, |this, other| this.difference(other).copied().collect())
    }

    /// Values that are in exactly one of this container and `other`
    #[inline]
    pub fn symmetric_difference(&self, other: &Self) -> IntSet {
        self.read_with(other, |this, other| {
            this.symmetric_difference(other).copied().collect()
        })
    }

    /// Values that are in both this container and `other`
    #[inline]
    pub fn intersection(&self, other: &Self) -> IntSet {
        self.read_with(other, |this, other| {
            this.intersection(other).copied().collect()
        })
    }

    /// Shallow copy of this container
    #[inline]
    pub fn copy(&self) -> IntSet {
        self.read(|this| this.clone())
    }

    /// Run a read-only operation against this container
    #[inline]
    fn read<R>(&self, op: impl FnOnce(&IntSet) -> R) -> R {
        let idx = self.side.index();
        self.pair.storage.read(|sets| op(sets[idx]))
    }

    /// Run a read-only operation against this container and another one
    #[inline]
    fn read_with<R>(&self, other: &Self, op: impl FnOnce(&IntSet, &IntSet) -> R) -> R {
        debug_assert!(
            std::ptr::eq(self.pair, other.pair),
            "containers from different pairs can't be combined"
        );
        let (this_idx, other_idx) = (self.side.index(), other.side.index());
        self.pair
            .storage
            .read(|sets| op(sets[this_idx], sets[other_idx]))
    }
}

/// Contents of both shared containers at some point in time
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    /// Contents of container A
    pub a: BTreeSet<u64>,

    /// Contents of container B
    pub b: BTreeSet<u64>,
}
//
impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_set(f: &mut fmt::Formatter<'_>, set: &BTreeSet<u64>) -> fmt::Result {
            f.write_str("{")?;
            for (idx, value) in set.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("}")
        }
        write_set(f, &self.a)?;
        f.write_str(" ")?;
        write_set(f, &self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_battery<S: SharedSets>() {
        let pair = SetPair::<S>::new();
        let (a, b) = (pair.a(), pair.b());
        assert_eq!(a.side(), Side::A);
        assert_eq!(b.side(), Side::B);

        // Empty containers are subsets and supersets of each other
        assert!(a.is_subset_of(&b));
        assert!(a.is_superset_of(&b));
        assert!(!a.contains(33));

        for value in [1, 2, 3, 33] {
            a.add(value);
        }
        for value in [3, 4] {
            b.add(value);
        }
        a.add(33);

        assert!(a.contains(33));
        assert!(!b.contains(33));
        assert!(!b.is_subset_of(&a));
        assert!(!a.is_superset_of(&b));
        assert_eq!(a.difference(&b), IntSet::from([1, 2, 33]));
        assert_eq!(b.difference(&a), IntSet::from([4]));
        assert_eq!(a.symmetric_difference(&b), IntSet::from([1, 2, 4, 33]));
        assert_eq!(b.intersection(&a), IntSet::from([3]));
        assert_eq!(b.copy(), IntSet::from([3, 4]));

        // Re-inserting a present value changes nothing
        b.add(4);
        assert_eq!(b.copy().len(), 2);

        let snapshot = pair.snapshot();
        assert_eq!(snapshot.a, BTreeSet::from([1, 2, 3, 33]));
        assert_eq!(snapshot.b, BTreeSet::from([3, 4]));
        if cfg!(feature = "detect-overlaps") {
            assert_eq!(pair.overlaps(), Some(0));
        } else {
            assert_eq!(pair.overlaps(), None);
        }
    }

    fn check_inclusion<S: SharedSets>() {
        let pair = SetPair::<S>::new();
        let (a, b) = (pair.a(), pair.b());
        for value in [1, 3] {
            a.add(value);
        }
        b.add(3);
        assert!(b.is_subset_of(&a));
        assert!(a.is_superset_of(&b));
        assert!(!a.is_subset_of(&b));
        assert!(a.is_subset_of(&a));
        assert!(b.symmetric_difference(&b).is_empty());
    }

    #[test]
    fn battery_racy() {
        check_battery::<RacySets>()
    }

    #[test]
    fn battery_locked() {
        check_battery::<LockedSets>()
    }

    #[test]
    fn inclusion_racy() {
        check_inclusion::<RacySets>()
    }

    #[test]
    fn inclusion_locked() {
        check_inclusion::<LockedSets>()
    }

    #[test]
    fn snapshot_display() {
        let snapshot = Snapshot {
            a: BTreeSet::from([13, 1, 5]),
            b: BTreeSet::new(),
        };
        assert_eq!(snapshot.to_string(), "{1, 5, 13} {}");
    }

    #[test]
    fn storage_strategies() {
        assert_eq!(RacySets::SYNCHRONIZATION, Synchronization::Unsynchronized);
        assert_eq!(LockedSets::SYNCHRONIZATION, Synchronization::Locked);
        assert_eq!(Synchronization::default(), Synchronization::Unsynchronized);
    }
}
