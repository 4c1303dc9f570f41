// Copyright (C) Pavel Grebnev 2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use zwohash::HashMap;

pub(crate) const PAGE_BITS: u32 = 10;
pub(crate) const PAGE_SIZE: usize = 1 << PAGE_BITS;
const PAGE_MASK: u64 = (PAGE_SIZE as u64) - 1;

/// Random-access array addressed by a 64-bit index, split into lazily allocated pages.
///
/// Pages are kept in a hash table keyed by page number, so indices can be spread over the whole
/// `u64` range without allocating anything for the unused ranges in between.
/// Elements of a freshly allocated page are `T::default()`.
#[derive(Clone, Debug)]
pub(crate) struct PagedArray<T> {
    pages: HashMap<u64, Box<[T]>>,
}

impl<T: Copy + Default> PagedArray<T> {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::default(),
        }
    }

    /// Returns the element at the index, or None if its page was never allocated.
    ///
    /// Never allocates.
    pub(crate) fn get(&self, index: u64) -> Option<&T> {
        let page = self.pages.get(&(index >> PAGE_BITS))?;
        Some(&page[(index & PAGE_MASK) as usize])
    }

    pub(crate) fn get_mut(&mut self, index: u64) -> Option<&mut T> {
        let page = self.pages.get_mut(&(index >> PAGE_BITS))?;
        Some(&mut page[(index & PAGE_MASK) as usize])
    }

    /// Returns the element at the index, allocating the covering page if needed.
    pub(crate) fn ensure(&mut self, index: u64) -> &mut T {
        let page = self.pages.entry(index >> PAGE_BITS).or_insert_with(|| {
            log::trace!("allocating sparse page for index {index}");
            vec![T::default(); PAGE_SIZE].into_boxed_slice()
        });
        &mut page[(index & PAGE_MASK) as usize]
    }

    /// Releases all pages, every element reads as absent afterwards.
    pub(crate) fn clear(&mut self) {
        self.pages.clear();
    }

    #[cfg(test)]
    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // empty paged array => get any index => nothing is returned
    #[test]
    fn empty_paged_array_get_any_index_nothing_is_returned() {
        let array: PagedArray<u32> = PagedArray::new();

        assert_eq!(array.get(0), None);
        assert_eq!(array.get(12345), None);
        assert_eq!(array.get(u64::MAX), None);
        assert_eq!(array.page_count(), 0);
    }

    // empty paged array => ensure index => element is default initialized
    #[test]
    fn empty_paged_array_ensure_index_element_is_default_initialized() {
        let mut array: PagedArray<u32> = PagedArray::new();

        assert_eq!(*array.ensure(5), 0);

        assert_eq!(array.get(5), Some(&0));
        assert_eq!(array.page_count(), 1);
    }

    // paged array => write through ensure => value can be read back
    #[test]
    fn paged_array_write_through_ensure_value_can_be_read_back() {
        let mut array: PagedArray<u32> = PagedArray::new();

        *array.ensure(42) = 7;
        *array.get_mut(42).unwrap() += 1;

        assert_eq!(array.get(42), Some(&8));
    }

    // paged array => ensure index in the same page => no new page is allocated
    #[test]
    fn paged_array_ensure_index_in_the_same_page_no_new_page_is_allocated() {
        let mut array: PagedArray<u32> = PagedArray::new();
        array.ensure(1);

        array.ensure(PAGE_SIZE as u64 - 1);

        assert_eq!(array.page_count(), 1);
        assert_eq!(array.get(2), Some(&0));
    }

    // paged array => ensure far apart indices => only two pages are allocated
    #[test]
    fn paged_array_ensure_far_apart_indices_only_two_pages_are_allocated() {
        let mut array: PagedArray<u32> = PagedArray::new();

        *array.ensure(3) = 1;
        *array.ensure(u64::MAX) = 2;

        assert_eq!(array.page_count(), 2);
        assert_eq!(array.get(3), Some(&1));
        assert_eq!(array.get(u64::MAX), Some(&2));
        assert_eq!(array.get(u64::MAX / 2), None);
    }

    // paged array with values => clear => all pages are released
    #[test]
    fn paged_array_with_values_clear_all_pages_are_released() {
        let mut array: PagedArray<u32> = PagedArray::new();
        *array.ensure(3) = 1;
        *array.ensure(1 << 40) = 2;

        array.clear();

        assert_eq!(array.page_count(), 0);
        assert_eq!(array.get(3), None);
        assert_eq!(array.get_mut(1 << 40), None);
    }
}
