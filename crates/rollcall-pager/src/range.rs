//! Page-index sequences with ellipsis markers.
//!
//! [`page_range`] produces the compact list of page links a listing renders
//! between its Previous and Next buttons: the first and last page are always
//! present, the current page is surrounded by `sibling_count` neighbours, and
//! an [`PageItem::Ellipsis`] stands in for every elided run of pages.

use std::fmt;

use serde::{Serialize, Serializer};

/// Sibling count used when a caller does not pick one.
pub const DEFAULT_SIBLING_COUNT: usize = 1;

/// One entry of a rendered page-index sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    /// A link to a 1-based page number.
    Page(usize),
    /// A placeholder for an elided range of pages.
    Ellipsis,
}

impl PageItem {
    /// Returns the page number, or `None` for an ellipsis.
    pub fn page(self) -> Option<usize> {
        match self {
            PageItem::Page(page) => Some(page),
            PageItem::Ellipsis => None,
        }
    }

    /// Returns `true` if this is an ellipsis marker.
    pub fn is_ellipsis(self) -> bool {
        matches!(self, PageItem::Ellipsis)
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{}", page),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

// Pages serialize as bare numbers and ellipses as "...", the shape the
// page-link templates consume.
impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(page) => serializer.serialize_u64(*page as u64),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Computes the page-index sequence for `current_page` out of `total_pages`.
///
/// When every page fits (`total_pages <= sibling_count * 2 + 5`) the full
/// `1..=total_pages` run is returned. Otherwise the first and last pages are
/// always included, `sibling_count` pages are shown on each side of the
/// current page, and an ellipsis is inserted on the left when the left
/// sibling is past page 2 and on the right when the right sibling is before
/// `total_pages - 1`.
///
/// Out-of-range inputs are clamped: `total_pages` of 0 counts as 1 and
/// `current_page` is forced into `[1, total_pages]`.
///
/// ```
/// use rollcall_pager::{page_range, PageItem::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_range(5, 20, 1),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(20)]
/// );
/// ```
pub fn page_range(current_page: usize, total_pages: usize, sibling_count: usize) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);

    if total <= sibling_count.saturating_mul(2).saturating_add(5) {
        return (1..=total).map(PageItem::Page).collect();
    }

    let left_sibling = current.saturating_sub(sibling_count).max(1);
    let right_sibling = current.saturating_add(sibling_count).min(total);

    let mut items = Vec::with_capacity(sibling_count.saturating_mul(2).saturating_add(5));
    items.push(PageItem::Page(1));

    if left_sibling > 2 {
        items.push(PageItem::Ellipsis);
    }

    // First and last are pushed separately; the middle run never repeats them.
    let middle_start = left_sibling.max(2);
    let middle_end = right_sibling.min(total - 1);
    items.extend((middle_start..=middle_end).map(PageItem::Page));

    if right_sibling < total - 1 {
        items.push(PageItem::Ellipsis);
    }

    items.push(PageItem::Page(total));
    items
}
