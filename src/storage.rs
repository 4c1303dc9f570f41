// Copyright (C) Pavel Grebnev 2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::paged::PagedArray;
use crate::sparse_entry::SparseEntry;

/// DenseStorage is the storage for the dense index, a combination of the sparse map and two
/// index-aligned dense arrays.
///
/// Dense order stores identifiers, position 0 is a sentinel that never holds a real identifier.
/// Payload stores one record per dense position, shifted by one to skip the sentinel
/// (position `p` owns `payload[p - 1]`).
///
/// The two dense arrays always have matching lengths, and the only way to move an identifier
/// between positions is `swap_positions`, which updates all three structures at once.
#[derive(Clone, Debug)]
pub(crate) struct DenseStorage<T> {
    // identifiers by dense position, slot 0 is the sentinel
    order: Vec<u64>,
    // records by dense position minus one
    payload: Vec<T>,
    // dense positions by identifier
    sparse: PagedArray<SparseEntry>,
}

impl<T> DenseStorage<T> {
    pub(crate) fn new() -> Self {
        Self {
            order: vec![0],
            payload: Vec::new(),
            sparse: PagedArray::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut order = Vec::with_capacity(capacity + 1);
        order.push(0);
        Self {
            order,
            payload: Vec::with_capacity(capacity),
            sparse: PagedArray::new(),
        }
    }

    /// Number of dense positions including the sentinel.
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn sparse_entry(&self, id: u64) -> Option<SparseEntry> {
        self.sparse.get(id).copied()
    }

    pub(crate) fn value(&self, position: usize) -> &T {
        debug_assert!(position != 0, "The sentinel has no payload");
        &self.payload[position - 1]
    }

    pub(crate) fn value_mut(&mut self, position: usize) -> &mut T {
        debug_assert!(position != 0, "The sentinel has no payload");
        &mut self.payload[position - 1]
    }

    /// Identifiers of the dense positions `[1, end)`.
    pub(crate) fn ids(&self, end: usize) -> &[u64] {
        &self.order[1..end]
    }

    /// Records of the dense positions `[1, end)`.
    pub(crate) fn values(&self, end: usize) -> &[T] {
        &self.payload[..end - 1]
    }

    pub(crate) fn values_mut(&mut self, end: usize) -> &mut [T] {
        &mut self.payload[..end - 1]
    }

    /// Exchanges the identifiers at two dense positions together with their records, and points
    /// both sparse entries at their new positions.
    pub(crate) fn swap_positions(&mut self, a: usize, b: usize) {
        debug_assert!(a != b, "Can't swap a position with itself");
        debug_assert!(a != 0 && b != 0, "Can't swap the sentinel");

        let id_a = self.order[a];
        let id_b = self.order[b];

        self.order.swap(a, b);
        self.payload.swap(a - 1, b - 1);

        for (id, position) in [(id_a, b), (id_b, a)] {
            match self.sparse.get_mut(id) {
                Some(entry) => entry.set_dense_position(position),
                // every id in the dense order has a sparse entry
                None => unreachable!(),
            }
        }
    }

    /// Clears the sparse map and both dense arrays, keeping only the sentinel.
    ///
    /// The dense arrays keep their allocations to be reused.
    pub(crate) fn clear(&mut self) {
        self.sparse.clear();
        self.order.truncate(1);
        self.payload.clear();
    }
}

impl<T: Default> DenseStorage<T> {
    /// Appends the id at a new tail position with a default record and pairs it with that
    /// position. Returns the new position.
    pub(crate) fn push(&mut self, id: u64) -> usize {
        let position = self.order.len();
        log::trace!("growing dense order to {} slots for id {id}", position);

        self.order.push(id);
        self.payload.push(T::default());
        self.sparse.ensure(id).set_dense_position(position);

        position
    }
}

#[cfg(test)]
impl<T> DenseStorage<T> {
    pub(crate) fn id_at(&self, position: usize) -> u64 {
        debug_assert!(position != 0, "The sentinel is not a real identifier");
        self.order[position]
    }

    pub(crate) fn payload_len(&self) -> usize {
        self.payload.len()
    }

    pub(crate) fn payload_capacity(&self) -> usize {
        self.payload.capacity()
    }

    pub(crate) fn sparse_page_count(&self) -> usize {
        self.sparse.page_count()
    }
}
