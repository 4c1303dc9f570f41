// Copyright (C) Pavel Grebnev 2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

mod id_set;
mod paged;
mod sparse_entry;
mod storage;

pub use id_set::DenseIdSet;

/// An index that maps sparse, externally assigned 64-bit identifiers to densely packed records.
///
/// Identifiers can be arbitrary (non-contiguous, huge, reused over time), while the records of
/// the identifiers that are currently alive always stay contiguous in memory, which makes
/// iterating over them cache-friendly.
///
/// Removed identifiers keep their slot in the recycled part of the dense storage, so bringing the
/// same identifier back doesn't need to grow anything. The storage never shrinks except on
/// [`clear`](Self::clear).
///
/// Identifier `0` is reserved and must not be used.
///
/// Lookups, insertions and removals are O(1) (insertions amortized).
/// Iteration goes over alive records only, in no particular order.
///
/// References returned by [`ensure`](Self::ensure), [`get`](Self::get) and
/// [`get_mut`](Self::get_mut) borrow the index, so they can't be held across any further
/// mutation. Store the identifier and look the record up again instead.
///
/// The index is not synchronized, wrap it into a lock to share it between threads.
#[derive(Clone, Debug)]
pub struct DenseIndex<T> {
    // sparse map, dense order and payload
    storage: storage::DenseStorage<T>,
    // first dense position past the alive ones, positions [1, alive_end) are alive
    alive_end: usize,
}

impl<T> DenseIndex<T> {
    /// Creates an empty index. Allocates only the reserved sentinel slot.
    pub fn new() -> Self {
        Self {
            storage: storage::DenseStorage::new(),
            alive_end: 1,
        }
    }

    /// Creates an empty index with memory allocated for the given number of records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: storage::DenseStorage::with_capacity(capacity),
            alive_end: 1,
        }
    }

    /// Returns a reference to the record of the identifier.
    /// If the identifier is not alive, returns None.
    ///
    /// O(1) time complexity.
    pub fn get(&self, id: u64) -> Option<&T> {
        self.alive_position(id).map(|position| self.storage.value(position))
    }

    /// Returns a mutable reference to the record of the identifier.
    /// If the identifier is not alive, returns None.
    ///
    /// O(1) time complexity.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        match self.alive_position(id) {
            Some(position) => Some(self.storage.value_mut(position)),
            None => None,
        }
    }

    /// Returns true if the identifier is alive.
    ///
    /// O(1) time complexity.
    pub fn contains(&self, id: u64) -> bool {
        self.alive_position(id).is_some()
    }

    /// Removes the identifier, swapping its slot with the last alive one.
    /// Returns false if the identifier was not alive, in which case nothing is changed.
    ///
    /// The record is not dropped: the slot goes to the recycled part of the storage and is
    /// given back if the same identifier is ensured again.
    ///
    /// O(1) time complexity, however changes the order of elements.
    pub fn remove(&mut self, id: u64) -> bool {
        let position = match self.alive_position(id) {
            Some(position) => position,
            None => return false,
        };

        let last_alive = self.alive_end - 1;
        if position != last_alive {
            self.storage.swap_positions(position, last_alive);
        }
        self.alive_end = last_alive;

        true
    }

    /// Forgets all identifiers and drops all records.
    ///
    /// Sparse pages are released, dense memory is kept allocated to be reused.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing dense index with {} alive out of {} slots",
            self.count(),
            self.capacity()
        );
        self.storage.clear();
        self.alive_end = 1;
    }

    /// Clears the index and releases all its memory.
    pub fn free(mut self) {
        self.clear();
        log::debug!("releasing dense index memory");
    }

    /// Returns the number of alive identifiers.
    ///
    /// O(1) time complexity.
    pub fn count(&self) -> usize {
        self.alive_end - 1
    }

    /// Returns true if there are no alive identifiers.
    pub fn is_empty(&self) -> bool {
        self.alive_end == 1
    }

    /// Returns the number of slots ever allocated since the last clear, alive and recycled.
    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// Returns an iterator over the alive identifiers.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.storage.ids(self.alive_end).iter().copied()
    }

    /// Returns an iterator over the records of the alive identifiers.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.storage.values(self.alive_end).iter()
    }

    /// Returns an iterator over the mutable records of the alive identifiers.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> {
        self.storage.values_mut(self.alive_end).iter_mut()
    }

    /// Returns an iterator over the alive identifiers and their records.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u64, &T)> {
        self.storage
            .ids(self.alive_end)
            .iter()
            .copied()
            .zip(self.storage.values(self.alive_end).iter())
    }

    fn alive_position(&self, id: u64) -> Option<usize> {
        let position = self.storage.sparse_entry(id)?.dense_position()?;
        if position < self.alive_end {
            Some(position)
        } else {
            None
        }
    }
}

impl<T: Default> DenseIndex<T> {
    /// Returns the record of the identifier, making the identifier alive if it wasn't.
    ///
    /// An identifier that is seen for the first time gets a `T::default()` record.
    /// An identifier that was removed before gets its recycled slot back, the record in it is
    /// left as it was (usually the value it had when it was removed).
    ///
    /// This can heap-allocate (if the internal arrays need to grow).
    ///
    /// O(1) amortized time complexity.
    pub fn ensure(&mut self, id: u64) -> &mut T {
        let position = self.pair(id);
        self.storage.value_mut(position)
    }

    // returns the alive position of the id, moving it to the alive part if needed
    fn pair(&mut self, id: u64) -> usize {
        debug_assert!(id != 0, "Identifier 0 is reserved");

        let boundary = self.alive_end;
        let dense_position = self
            .storage
            .sparse_entry(id)
            .and_then(|entry| entry.dense_position());

        match dense_position {
            Some(position) if position < boundary => return position,
            Some(position) => {
                // recycled, bring it to the first non-alive position
                if position != boundary {
                    self.storage.swap_positions(position, boundary);
                }
            }
            None => {
                let tail = self.storage.push(id);
                // a recycled id occupies the boundary, move it to the new tail
                if tail != boundary {
                    self.storage.swap_positions(boundary, tail);
                }
            }
        }

        self.alive_end += 1;
        boundary
    }
}

impl<T> Default for DenseIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
