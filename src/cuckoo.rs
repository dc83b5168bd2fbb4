use crate::vecs::FixedTable;

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
};

/// Fixed-capacity hash map using two-table cuckoo hashing.
///
/// Every key has one candidate slot per table, chosen by two independent
/// hashers. Insertion may evict the occupant of a candidate slot and relocate
/// it to its slot in the other table, repeating until an empty slot is found
/// or the displacement limit is hit. The tables are allocated once at
/// construction and never resized.
///
/// # Example
///
/// ```
///     use twomap::CuckooHashMap;
///     let mut map = CuckooHashMap::with_capacity(16);
///     map.insert("England", "London").unwrap();
///     map.insert("France", "Paris").unwrap();
///     assert_eq!(map.get("France"), Some(&"Paris"));
/// ```
pub struct CuckooHashMap<K, V, S1 = RandomState, S2 = RandomState> {
    t1: FixedTable<Slot<K, V>>,
    t2: FixedTable<Slot<K, V>>,
    capacity: usize,
    size: usize,
    hash1: S1,
    hash2: S2,
}

/// `None` means the slot is free to accept an entry without displacement.
type Slot<K, V> = Option<(K, V)>;

impl<K, V> CuckooHashMap<K, V> {
    /// Returns a map with `capacity` slots per table and a pair of
    /// independently seeded [`RandomState`] hashers.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hashers(capacity, RandomState::new(), RandomState::new())
    }
}

impl<K, V, S1, S2> CuckooHashMap<K, V, S1, S2> {
    /// Maximum number of full displacement rounds attempted by [`insert`](Self::insert).
    pub const MAX_ITERATIONS: usize = 100;

    /// Returns a map with `capacity` slots per table, using the supplied hashers.
    ///
    /// The two hashers must be independent for displacement to terminate on
    /// reasonable loads; handing in two identically seeded hashers degrades
    /// every chain into a two-slot cycle.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity_and_hashers(capacity: usize, hash1: S1, hash2: S2) -> Self {
        assert!(capacity > 0, "CuckooHashMap capacity must be non-zero");
        Self {
            t1: FixedTable::new(capacity),
            t2: FixedTable::new(capacity),
            capacity,
            size: 0,
            hash1,
            hash2,
        }
    }

    /// Number of live entries the map has recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Is the recorded entry count zero?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots per table.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V, S1, S2> CuckooHashMap<K, V, S1, S2>
where
    K: Hash + Eq,
    S1: BuildHasher,
    S2: BuildHasher,
{
    /// Insert a key-value pair, displacing colliding occupants between the
    /// two tables until a free slot is found.
    ///
    /// A key already present is not deduplicated: the new pair is placed as
    /// an additional live entry, usually pushing the older copy to its slot
    /// in the other table.
    ///
    /// # Errors
    ///
    /// Fails with [`CuckooCycleError`] after [`MAX_ITERATIONS`](Self::MAX_ITERATIONS)
    /// rounds without finding a free slot. Entries relocated before the
    /// failure stay relocated; the pair left in hand is returned inside the
    /// error.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), CuckooCycleError<K, V>> {
        let mut carried = (key, value);

        for _ in 0..Self::MAX_ITERATIONS {
            let h1 = self.index1(&carried.0);
            match self.t1.replace(h1, Some(carried)) {
                None => return Ok(()),
                Some(displaced) => carried = displaced,
            }

            let h2 = self.index2(&carried.0);
            match self.t2.replace(h2, Some(carried)) {
                None => return Ok(()),
                Some(displaced) => carried = displaced,
            }
        }

        Err(CuckooCycleError { entry: carried })
    }

    /// Get reference to the value corresponding to the key.
    ///
    /// Probes the key's slot in the first table, then the second.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h1 = self.index1(key);
        if let Some((k, v)) = self.t1.ix(h1) {
            if k.borrow() == key {
                return Some(v);
            }
        }
        let h2 = self.index2(key);
        if let Some((k, v)) = self.t2.ix(h2) {
            if k.borrow() == key {
                return Some(v);
            }
        }
        None
    }

    /// Does the map have an entry for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// First-table slot index for a key.
    pub(crate) fn index1<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hash1.hash_one(key) % self.capacity as u64) as usize
    }

    /// Second-table slot index for a key.
    pub(crate) fn index2<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hash2.hash_one(key) % self.capacity as u64) as usize
    }
}

#[cfg(test)]
impl<K, V, S1, S2> CuckooHashMap<K, V, S1, S2> {
    pub(crate) fn slot1(&self, ix: usize) -> Option<&(K, V)> {
        self.t1.ix(ix).as_ref()
    }

    pub(crate) fn slot2(&self, ix: usize) -> Option<&(K, V)> {
        self.t2.ix(ix).as_ref()
    }

    pub(crate) fn occupied(&self) -> usize {
        let count = |t: &FixedTable<Slot<K, V>>| (0..t.len()).filter(|&i| t.ix(i).is_some()).count();
        count(&self.t1) + count(&self.t2)
    }
}

/// Error returned by [`CuckooHashMap::insert`] when the displacement loop
/// exhausts its iteration limit without finding a free slot.
///
/// The tables keep every relocation performed before the failure; no rollback
/// is attempted. The pair that was left in hand rides in the error and can be
/// recovered with [`into_entry`](Self::into_entry). It is whichever pair was
/// displaced last, not necessarily the one passed to `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuckooCycleError<K, V> {
    entry: (K, V),
}

impl<K, V> CuckooCycleError<K, V> {
    /// The entry that could not be placed.
    #[must_use]
    pub fn into_entry(self) -> (K, V) {
        self.entry
    }
}

impl<K, V> fmt::Display for CuckooCycleError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cuckoo hashing: displacement iteration limit exceeded")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> std::error::Error for CuckooCycleError<K, V> {}
