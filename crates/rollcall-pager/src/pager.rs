//! Page window arithmetic and the [`Pager`] value object.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::range::{page_range, PageItem, DEFAULT_SIBLING_COUNT};
use crate::size::{PageSize, PageSizeOptions};

/// Returns `max(1, ceil(total_items / page_size))`.
///
/// A `page_size` of 0 is treated as 1.
pub fn compute_total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
///
/// Negative and zero requests land on page 1; `total_pages` of 0 counts as 1.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let total = total_pages.max(1);
    if page < 1 {
        return 1;
    }
    usize::try_from(page).unwrap_or(usize::MAX).min(total)
}

/// Clamps a fractional page request, as produced by loosely-typed inputs.
///
/// `NaN` maps to page 1 and finite values are truncated before clamping.
pub fn clamp_page_f64(page: f64, total_pages: usize) -> usize {
    if page.is_nan() {
        return 1;
    }
    clamp_page(page.trunc() as i64, total_pages)
}

/// Returns the 1-based inclusive `(start, end)` item range shown on a page,
/// for a "showing X–Y of Z" summary.
///
/// Both ends are 0 when the total is unknown or there are no items.
///
/// ```
/// use rollcall_pager::visible_range;
///
/// assert_eq!(visible_range(2, 10, Some(25)), (11, 20));
/// assert_eq!(visible_range(3, 10, Some(25)), (21, 25));
/// assert_eq!(visible_range(1, 10, None), (0, 0));
/// ```
pub fn visible_range(current_page: usize, page_size: usize, total_items: Option<usize>) -> (usize, usize) {
    let total = match total_items {
        Some(total) if total > 0 => total,
        _ => return (0, 0),
    };
    let size = page_size.max(1);
    let page = current_page.clamp(1, compute_total_pages(total, size));

    let start = (page - 1).saturating_mul(size).saturating_add(1);
    let end = page.saturating_mul(size).min(total);
    (start, end)
}

/// Returns the 0-based slice bounds of `current_page` within `len` items.
///
/// The range is empty when the page starts past the end.
pub fn page_bounds(current_page: usize, page_size: usize, len: usize) -> Range<usize> {
    let size = page_size.max(1);
    let start = current_page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(size)
        .min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// Which count is authoritative for a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Total {
    /// Total item count; pages are derived from it and the page size.
    Items(usize),
    /// Total page count supplied directly (items unknown).
    Pages(usize),
}

impl Default for Total {
    fn default() -> Self {
        Total::Items(0)
    }
}

/// Navigation event handed back to the caller when the pager moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChange {
    /// The new current page.
    pub page: usize,
    /// The page size in effect after the change.
    pub page_size: usize,
}

/// Paging state for one listing.
///
/// A `Pager` is a value object: hosting code rebuilds or updates it whenever
/// the collection, the page size or the requested page changes. The current
/// page is kept inside `[1, total_pages]` at all times.
///
/// # Example
///
/// ```
/// use rollcall_pager::{Pager, PageChange};
///
/// let mut pager = Pager::with_total_items(95).page_size(10);
/// assert_eq!(pager.total_pages(), 10);
///
/// assert_eq!(pager.go_to_page(42), Some(PageChange { page: 10, page_size: 10 }));
/// assert_eq!(pager.go_to_page(10), None);
///
/// let change = pager.set_page_size(50);
/// assert_eq!(change, PageChange { page: 1, page_size: 50 });
/// assert_eq!(pager.total_pages(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    page_size: PageSize,
    total: Total,
    options: PageSizeOptions,
    sibling_count: usize,
}

impl Pager {
    /// Creates a pager on page 1 with the default page size.
    pub fn new(total: Total) -> Self {
        Pager {
            current_page: 1,
            page_size: PageSize::DEFAULT,
            total,
            options: PageSizeOptions::default(),
            sibling_count: DEFAULT_SIBLING_COUNT,
        }
    }

    /// Creates a pager whose pages derive from an item count.
    pub fn with_total_items(total_items: usize) -> Self {
        Pager::new(Total::Items(total_items))
    }

    /// Creates a pager with a known page count and unknown item count.
    pub fn with_total_pages(total_pages: usize) -> Self {
        Pager::new(Total::Pages(total_pages))
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Sets the page size, normalized to at least 1.
    pub fn page_size(mut self, size: i64) -> Self {
        self.page_size = PageSize::new(size);
        self.current_page = clamp_page(self.current_page as i64, self.total_pages());
        self
    }

    /// Sets the current page, clamped into range.
    pub fn page(mut self, page: i64) -> Self {
        self.current_page = clamp_page(page, self.total_pages());
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn page_size_options(mut self, options: PageSizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets how many neighbours of the current page the index shows.
    pub fn sibling_count(mut self, count: usize) -> Self {
        self.sibling_count = count;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The page size in effect.
    pub fn get_page_size(&self) -> usize {
        self.page_size.get()
    }

    /// The authoritative total.
    pub fn total(&self) -> Total {
        self.total
    }

    /// The item count, if the pager is driven by one.
    pub fn total_items(&self) -> Option<usize> {
        match self.total {
            Total::Items(items) => Some(items),
            Total::Pages(_) => None,
        }
    }

    /// The page count, always at least 1.
    pub fn total_pages(&self) -> usize {
        match self.total {
            Total::Items(items) => compute_total_pages(items, self.page_size.get()),
            Total::Pages(pages) => pages.max(1),
        }
    }

    /// The page sizes offered to the user.
    pub fn options(&self) -> &PageSizeOptions {
        &self.options
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Moves to `requested`, clamped into range.
    ///
    /// Returns `None` when the clamped target is already the current page,
    /// otherwise the change the caller should apply. Never fails.
    pub fn go_to_page(&mut self, requested: i64) -> Option<PageChange> {
        let target = clamp_page(requested, self.total_pages());
        if target as i64 != requested {
            tracing::trace!(requested, target, "page request clamped");
        }
        if target == self.current_page {
            return None;
        }
        self.current_page = target;
        Some(self.change())
    }

    /// Moves forward one page, if there is one.
    pub fn next_page(&mut self) -> Option<PageChange> {
        self.go_to_page(self.current_page as i64 + 1)
    }

    /// Moves back one page, if there is one.
    pub fn previous_page(&mut self) -> Option<PageChange> {
        self.go_to_page(self.current_page as i64 - 1)
    }

    /// Changes the page size and resets to page 1.
    ///
    /// Always returns the resulting state, even if neither value changed, so
    /// the caller can persist both.
    pub fn set_page_size(&mut self, size: i64) -> PageChange {
        self.page_size = PageSize::new(size);
        self.current_page = 1;
        tracing::trace!(page_size = self.page_size.get(), "page size changed");
        self.change()
    }

    /// Replaces the total (for example after new data arrives) and re-clamps
    /// the current page.
    pub fn set_total(&mut self, total: Total) {
        self.total = total;
        self.current_page = clamp_page(self.current_page as i64, self.total_pages());
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// The page-index sequence to render for the current position.
    pub fn page_range(&self) -> Vec<PageItem> {
        page_range(self.current_page, self.total_pages(), self.sibling_count)
    }

    /// The 1-based inclusive range of items on the current page.
    pub fn visible_range(&self) -> (usize, usize) {
        visible_range(self.current_page, self.page_size.get(), self.total_items())
    }

    /// The 0-based bounds of the current page within `len` items.
    pub fn page_bounds(&self, len: usize) -> Range<usize> {
        page_bounds(self.current_page, self.page_size.get(), len)
    }

    /// Cuts the current page out of an already filtered and sorted slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_bounds(items.len())]
    }

    fn change(&self) -> PageChange {
        PageChange {
            page: self.current_page,
            page_size: self.page_size.get(),
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Pager::new(Total::default())
    }
}
