// Copyright (C) Pavel Grebnev 2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

/// Per-identifier bookkeeping stored in the sparse map.
///
/// `dense_position` is the position of the identifier in the dense order:
/// - `0` means the identifier was never paired (position 0 is the reserved sentinel).
/// - any other value is the position the identifier occupies, which may be either in the
///   alive part or in the recycled part of the dense order.
///
/// Freshly allocated sparse pages are default-initialized, so every identifier that was never
/// written starts out unpaired.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub(crate) struct SparseEntry {
    dense_position: u32,
}

// The max position a sparse entry can point to
pub(crate) const MAX_DENSE_POSITION: usize = u32::MAX as usize;

impl SparseEntry {
    pub(crate) fn is_paired(&self) -> bool {
        self.dense_position != 0
    }

    /// Returns the dense position, or None if the entry was never paired.
    pub(crate) fn dense_position(&self) -> Option<usize> {
        if self.is_paired() {
            Some(self.dense_position as usize)
        } else {
            None
        }
    }

    pub(crate) fn set_dense_position(&mut self, dense_position: usize) {
        debug_assert!(dense_position != 0, "Position 0 is reserved for the sentinel");
        assert!(
            dense_position <= MAX_DENSE_POSITION,
            "Dense index can't hold more than {} slots",
            MAX_DENSE_POSITION
        );
        self.dense_position = dense_position as u32;
    }
}
