//! # Pagination
//!
//! Page arithmetic over a locally held collection. Everything here is a pure
//! function of `(total_items, page_size, current_page)`.
//!
//! ```text
//! total_items = 12, page_size = 5
//!
//!   page 1        page 2        page 3
//! [0 1 2 3 4]  [5 6 7 8 9]  [10 11]
//! ```
//!
//! Navigation refuses out-of-range moves on its own, even though the view
//! also disables the matching controls.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl PageState {
    /// Starts on page 1 of an empty collection. A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// Both checks are kept: right after a mutation `total_items` can already
    /// have moved while `current_page` has not been clamped yet.
    pub fn is_last_page(&self) -> bool {
        self.current_page == self.page_count()
            || self.total_items <= self.current_page * self.page_size
    }

    /// Index range of `page` into the collection, clipped to its length.
    pub fn slice_bounds(&self, page: usize) -> Range<usize> {
        let page = page.max(1);
        let end = (page * self.page_size).min(self.total_items);
        let start = ((page - 1) * self.page_size).min(end);
        start..end
    }

    pub fn visible_bounds(&self) -> Range<usize> {
        self.slice_bounds(self.current_page)
    }

    /// Returns true if the page changed.
    pub fn go_next(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Returns true if the page changed.
    pub fn go_previous(&mut self) -> bool {
        if self.is_first_page() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Updates the item count without touching the current page; call
    /// [`clamp`](Self::clamp) afterwards to restore the bounds invariant.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
    }

    /// Pulls the current page back inside `1..=page_count`.
    /// Returns true if the page moved.
    pub fn clamp(&mut self) -> bool {
        let last = self.page_count();
        if self.current_page > last {
            self.current_page = last;
            return true;
        }
        false
    }

    /// 1-based position of the `index`-th visible row within the whole collection.
    pub fn item_number(&self, index: usize) -> usize {
        (self.current_page - 1) * self.page_size + index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: usize, size: usize, current: usize) -> PageState {
        let mut state = PageState::new(size);
        state.set_total_items(total);
        while state.current_page() < current && state.go_next() {}
        state
    }

    #[test]
    fn test_page_count_is_at_least_one() {
        for size in 1..=7 {
            for total in 0..=40 {
                let state = page(total, size, 1);
                let expected = std::cmp::max(1, total.div_ceil(size));
                assert_eq!(state.page_count(), expected, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn test_visible_slice_length_on_every_valid_page() {
        for size in 1..=6 {
            for total in 0..=30 {
                let mut state = page(total, size, 1);
                loop {
                    let len = state.visible_bounds().len();
                    let offset = (state.current_page() - 1) * size;
                    assert_eq!(len, size.min(total - offset));
                    assert_eq!(len == 0, total == 0);
                    if !state.go_next() {
                        break;
                    }
                }
                assert_eq!(state.current_page(), state.page_count());
            }
        }
    }

    #[test]
    fn test_twelve_items_page_three() {
        let state = page(12, 5, 3);
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.visible_bounds(), 10..12);
        assert!(state.is_last_page());
        assert!(!state.is_first_page());
    }

    #[test]
    fn test_go_next_on_last_page_is_noop() {
        let mut state = page(12, 5, 3);
        assert!(!state.go_next());
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn test_go_previous_on_first_page_is_noop() {
        let mut state = page(12, 5, 1);
        assert!(!state.go_previous());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_empty_collection_is_single_page() {
        let mut state = PageState::new(5);
        assert_eq!(state.page_count(), 1);
        assert!(state.is_first_page());
        assert!(state.is_last_page());
        assert!(!state.go_next());
        assert_eq!(state.visible_bounds(), 0..0);
    }

    #[test]
    fn test_exact_multiple_stops_on_last_full_page() {
        let mut state = page(10, 5, 2);
        assert_eq!(state.current_page(), 2);
        assert!(state.is_last_page());
        assert!(!state.go_next());
    }

    #[test]
    fn test_clamp_after_shrink_moves_back_once() {
        let mut state = page(11, 5, 3);
        state.set_total_items(10);
        // Transient: still on page 3 of 2, both last-page checks fire.
        assert!(state.is_last_page());
        assert!(state.clamp());
        assert_eq!(state.current_page(), 2);
        assert!(!state.clamp());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_clamp_to_first_page_when_emptied() {
        let mut state = page(6, 5, 2);
        state.set_total_items(0);
        state.clamp();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_set_total_items_keeps_position() {
        let mut state = page(20, 5, 3);
        state.set_total_items(25);
        assert_eq!(state.current_page(), 3);
        assert!(!state.clamp());
    }

    #[test]
    fn test_slice_bounds_past_end_is_empty() {
        let state = page(4, 5, 1);
        assert_eq!(state.slice_bounds(3), 4..4);
    }

    #[test]
    fn test_zero_page_size_is_bumped() {
        let state = PageState::new(0);
        assert_eq!(state.page_size(), 1);
    }

    #[test]
    fn test_item_number() {
        let state = page(12, 5, 2);
        assert_eq!(state.item_number(0), 6);
        assert_eq!(state.item_number(4), 10);
    }
}
