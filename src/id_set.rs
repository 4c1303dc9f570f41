// Copyright (C) Pavel Grebnev 2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::DenseIndex;

/// A dense index without records, it only tracks which identifiers are alive.
///
/// Works the same way as [`DenseIndex`] (including slot recycling), but never hands out any
/// references since there is nothing to point to.
#[derive(Clone, Debug, Default)]
pub struct DenseIdSet {
    index: DenseIndex<()>,
}

impl DenseIdSet {
    /// Creates an empty set. Allocates only the reserved sentinel slot.
    pub fn new() -> Self {
        Self {
            index: DenseIndex::new(),
        }
    }

    /// Creates an empty set with memory allocated for the given number of identifiers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: DenseIndex::with_capacity(capacity),
        }
    }

    /// Makes the identifier alive. Returns true if it wasn't alive before.
    ///
    /// O(1) amortized time complexity.
    pub fn ensure(&mut self, id: u64) -> bool {
        if self.index.contains(id) {
            return false;
        }
        self.index.ensure(id);
        true
    }

    /// Returns true if the identifier is alive.
    pub fn contains(&self, id: u64) -> bool {
        self.index.contains(id)
    }

    /// Removes the identifier. Returns false if it was not alive.
    pub fn remove(&mut self, id: u64) -> bool {
        self.index.remove(id)
    }

    /// Forgets all identifiers.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Returns the number of alive identifiers.
    pub fn count(&self) -> usize {
        self.index.count()
    }

    /// Returns true if there are no alive identifiers.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of slots ever allocated since the last clear, alive and recycled.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Returns an iterator over the alive identifiers.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.index.ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // empty id set => ensure and check => id is alive without any record
    #[test]
    fn empty_id_set_ensure_and_check_id_is_alive_without_any_record() {
        let mut set = DenseIdSet::new();

        assert!(set.ensure(1));

        assert!(set.contains(1));
        assert!(!set.contains(2));
        assert_eq!(set.count(), 1);
    }

    // id set with one id => ensure it again => reports it was already alive
    #[test]
    fn id_set_with_one_id_ensure_it_again_reports_it_was_already_alive() {
        let mut set = DenseIdSet::new();
        set.ensure(1);

        assert!(!set.ensure(1));

        assert_eq!(set.count(), 1);
        assert_eq!(set.capacity(), 1);
    }

    // id set with two ids => remove one => removal is observable through the count
    #[test]
    fn id_set_with_two_ids_remove_one_removal_is_observable_through_the_count() {
        let mut set = DenseIdSet::new();
        set.ensure(1);
        set.ensure(2);

        assert!(set.remove(1));
        assert!(!set.remove(1));

        assert_eq!(set.count(), 1);
        assert_eq!(set.capacity(), 2);
        assert!(!set.contains(1));
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![2]);
    }

    // id set with removed id => ensure it again => slot is reused
    #[test]
    fn id_set_with_removed_id_ensure_it_again_slot_is_reused() {
        let mut set = DenseIdSet::with_capacity(4);
        set.ensure(5);
        set.remove(5);

        assert!(set.ensure(5));

        assert!(set.contains(5));
        assert_eq!(set.capacity(), 1);
    }

    // id set with ids => clear => set is empty
    #[test]
    fn id_set_with_ids_clear_set_is_empty() {
        let mut set = DenseIdSet::new();
        set.ensure(1);
        set.ensure(u64::MAX);

        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.capacity(), 0);
        assert!(!set.contains(u64::MAX));
    }
}
