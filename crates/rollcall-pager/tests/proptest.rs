//! Property-based tests for the pager using proptest.

use proptest::prelude::*;
use rollcall_pager::{
    clamp_page, compute_total_pages, page_range, visible_range, PageItem, Pager, Total,
};

proptest! {
    /// There is always at least one page.
    #[test]
    fn total_pages_at_least_one(total_items in 0usize..100_000, page_size in 1usize..500) {
        prop_assert!(compute_total_pages(total_items, page_size) >= 1);
    }

    /// Every item fits and no page is empty (except the lone page of an empty list).
    #[test]
    fn total_pages_cover_items(total_items in 1usize..100_000, page_size in 1usize..500) {
        let pages = compute_total_pages(total_items, page_size);
        prop_assert!(pages * page_size >= total_items);
        prop_assert!((pages - 1) * page_size < total_items);
    }

    /// Clamping lands in range and is idempotent.
    #[test]
    fn clamp_in_range_and_idempotent(page in any::<i64>(), total in 0usize..10_000) {
        let once = clamp_page(page, total);
        prop_assert!(once >= 1);
        prop_assert!(once <= total.max(1));
        prop_assert_eq!(clamp_page(once as i64, total), once);
    }

    /// The page index starts at 1, ends at the last page, is strictly
    /// increasing, never has two ellipses in a row and always contains the
    /// current page.
    #[test]
    fn page_range_shape(total in 1usize..500, current in 1usize..500, siblings in 0usize..4) {
        let current = current.min(total);
        let items = page_range(current, total, siblings);

        prop_assert_eq!(items.first().copied(), Some(PageItem::Page(1)));
        prop_assert_eq!(items.last().copied(), Some(PageItem::Page(total)));
        prop_assert!(items.contains(&PageItem::Page(current)));

        let numbers: Vec<usize> = items.iter().filter_map(|item| item.page()).collect();
        prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));

        prop_assert!(items.windows(2).all(|w| !(w[0].is_ellipsis() && w[1].is_ellipsis())));
    }

    /// An ellipsis always hides at least one page.
    #[test]
    fn ellipsis_hides_pages(total in 1usize..500, current in 1usize..500, siblings in 0usize..4) {
        let items = page_range(current.min(total), total, siblings);
        for (i, item) in items.iter().enumerate() {
            if item.is_ellipsis() {
                let before = items[i - 1].page().unwrap();
                let after = items[i + 1].page().unwrap();
                prop_assert!(after - before >= 2);
            }
        }
    }

    /// Small totals are never elided.
    #[test]
    fn small_totals_have_no_ellipsis(total in 1usize..=7, current in 1usize..=7) {
        let items = page_range(current.min(total), total, 1);
        prop_assert_eq!(items.len(), total);
        prop_assert!(items.iter().all(|item| !item.is_ellipsis()));
    }

    /// The visible range matches the slice cut out by the pager.
    #[test]
    fn visible_range_matches_slice(total in 1usize..1_000, size in 1i64..120, page in -5i64..100) {
        let items: Vec<usize> = (1..=total).collect();
        let pager = Pager::new(Total::Items(total)).page_size(size).page(page);
        let slice = pager.slice(&items);
        let (start, end) = pager.visible_range();

        prop_assert!(!slice.is_empty());
        prop_assert_eq!(slice.first().copied(), Some(start));
        prop_assert_eq!(slice.last().copied(), Some(end));
        prop_assert_eq!(
            visible_range(pager.current_page(), pager.get_page_size(), Some(total)),
            (start, end)
        );
    }

    /// Changing the page size always returns to page 1.
    #[test]
    fn page_size_change_resets(total in 0usize..10_000, page in 1i64..1_000, size in -10i64..200) {
        let mut pager = Pager::with_total_items(total).page(page);
        let change = pager.set_page_size(size);
        prop_assert_eq!(change.page, 1);
        prop_assert_eq!(pager.current_page(), 1);
        prop_assert!(change.page_size >= 1);
    }

    /// Navigation never leaves the window.
    #[test]
    fn navigation_stays_in_window(total in 0usize..5_000, requests in prop::collection::vec(any::<i64>(), 1..20)) {
        let mut pager = Pager::with_total_items(total);
        for request in requests {
            pager.go_to_page(request);
            prop_assert!(pager.current_page() >= 1);
            prop_assert!(pager.current_page() <= pager.total_pages());
        }
    }
}
