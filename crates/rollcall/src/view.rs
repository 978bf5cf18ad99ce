//! PageView result type and the paginate pipeline.
//!
//! A listing renders one page of a filtered, sorted collection together with
//! the metadata its controls need:
//! - The items on the current page
//! - The "Showing X–Y of Z" range
//! - The page-index sequence with ellipsis markers
//! - Previous/Next availability
//! - Whether the time window asks for an aggregate banner

use chrono::{DateTime, TimeZone};
use rollcall_pager::{PageItem, Pager};
use rollcall_query::{Clock, ListQuery, Record, TimeWindow, Value};
use serde::Serialize;

use crate::request::PageRequest;

/// One rendered page of a listing.
///
/// This struct is serialized and handed to the page template or returned
/// as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a, T> {
    /// Items on the current page (post-filtering, post-ordering).
    pub items: Vec<&'a T>,

    /// Current 1-based page after clamping.
    pub page: usize,

    /// Page size in effect.
    pub page_size: usize,

    /// Number of pages, at least 1.
    pub total_pages: usize,

    /// Records that passed the query.
    pub total_items: usize,

    /// Records before filtering.
    pub source_count: usize,

    /// 1-based inclusive range of the items shown; `(0, 0)` when empty.
    pub visible_range: (usize, usize),

    /// Page-index sequence for the page control.
    pub pages: Vec<PageItem>,

    pub has_previous: bool,
    pub has_next: bool,

    /// The time window the query ran with.
    pub time_window: TimeWindow,

    /// True when a time window is selected, including `all`.
    pub show_aggregate: bool,
}

impl<T> PageView<'_, T> {
    /// Returns true if the current page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on the current page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the query dropped any record.
    pub fn is_filtered(&self) -> bool {
        self.total_items < self.source_count
    }

    /// Renders the "Showing X–Y of Z" line.
    pub fn summary(&self) -> String {
        let (start, end) = self.visible_range;
        format!("Showing {}–{} of {}", start, end, self.total_items)
    }
}

/// Runs `query` over `records` and cuts out the requested page.
///
/// The page is clamped into the range the filtered result allows, so a
/// request for page 9 of a three-page result shows page 3.
pub fn paginate<'a, T, F, Tz>(
    records: &'a [T],
    query: &ListQuery,
    request: PageRequest,
    now: &DateTime<Tz>,
    accessor: F,
) -> PageView<'a, T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    Tz: TimeZone,
{
    let matched = query.apply(records, now, accessor);
    let page_size = i64::try_from(request.page_size.get()).unwrap_or(i64::MAX);
    let pager = Pager::with_total_items(matched.len())
        .page_size(page_size)
        .page(request.page);

    let bounds = pager.page_bounds(matched.len());
    let window = query.get_time_window();

    tracing::debug!(
        requested = request.page,
        page = pager.current_page(),
        total_pages = pager.total_pages(),
        on_page = bounds.len(),
        "paginated listing"
    );

    PageView {
        items: matched[bounds].to_vec(),
        page: pager.current_page(),
        page_size: pager.get_page_size(),
        total_pages: pager.total_pages(),
        total_items: matched.len(),
        source_count: records.len(),
        visible_range: pager.visible_range(),
        pages: pager.page_range(),
        has_previous: pager.has_previous(),
        has_next: pager.has_next(),
        time_window: window,
        show_aggregate: window.shows_aggregate(),
    }
}

/// [`paginate`] for types implementing [`Record`].
pub fn paginate_records<'a, T, Tz>(
    records: &'a [T],
    query: &ListQuery,
    request: PageRequest,
    now: &DateTime<Tz>,
) -> PageView<'a, T>
where
    T: Record,
    Tz: TimeZone,
{
    paginate(records, query, request, now, T::accessor)
}

/// [`paginate`] reading "now" from a [`Clock`].
pub fn paginate_with_clock<'a, T, F, C>(
    records: &'a [T],
    query: &ListQuery,
    request: PageRequest,
    clock: &C,
    accessor: F,
) -> PageView<'a, T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    C: Clock + ?Sized,
{
    paginate(records, query, request, &clock.now(), accessor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rollcall_query::Number;

    fn accessor<'a>(n: &'a u32, field: &str) -> Value<'a> {
        match field {
            "n" => Value::Number(Number::U64(u64::from(*n))),
            _ => Value::None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn middle_page() {
        let records: Vec<u32> = (1..=25).collect();
        let view = paginate(&records, &ListQuery::new(), PageRequest::new(2, 10), &now(), accessor);

        assert_eq!(view.items, [&11, &12, &13, &14, &15, &16, &17, &18, &19, &20]);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.visible_range, (11, 20));
        assert!(view.has_previous);
        assert!(view.has_next);
        assert_eq!(view.summary(), "Showing 11–20 of 25");
    }

    #[test]
    fn last_page_is_partial() {
        let records: Vec<u32> = (1..=25).collect();
        let view = paginate(&records, &ListQuery::new(), PageRequest::new(3, 10), &now(), accessor);
        assert_eq!(view.len(), 5);
        assert_eq!(view.visible_range, (21, 25));
        assert!(!view.has_next);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let records: Vec<u32> = (1..=25).collect();
        let view = paginate(&records, &ListQuery::new(), PageRequest::new(99, 10), &now(), accessor);
        assert_eq!(view.page, 3);

        let view = paginate(&records, &ListQuery::new(), PageRequest::new(-2, 10), &now(), accessor);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn empty_result() {
        let records: Vec<u32> = Vec::new();
        let view = paginate(&records, &ListQuery::new(), PageRequest::default(), &now(), accessor);
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.visible_range, (0, 0));
        assert_eq!(view.summary(), "Showing 0–0 of 0");
        assert_eq!(view.pages, [PageItem::Page(1)]);
    }

    #[test]
    fn pages_follow_filtered_count() {
        let records: Vec<u32> = (1..=100).collect();
        let query = ListQuery::new().search("1").search_field("n").sort_desc("n");
        let view = paginate(&records, &query, PageRequest::first(5), &now(), accessor);

        // 1, 10-19, 21, 31, ..., 91, 100
        assert_eq!(view.total_items, 20);
        assert_eq!(view.source_count, 100);
        assert!(view.is_filtered());
        assert_eq!(view.total_pages, 4);
        assert_eq!(view.items, [&100, &91, &81, &71, &61]);
    }

    #[test]
    fn aggregate_flag_follows_window() {
        let records: Vec<u32> = (1..=3).collect();
        let view = paginate(&records, &ListQuery::new(), PageRequest::default(), &now(), accessor);
        assert!(!view.show_aggregate);

        let query = ListQuery::new().time_window(TimeWindow::All);
        let view = paginate(&records, &query, PageRequest::default(), &now(), accessor);
        assert!(view.show_aggregate);
        assert_eq!(view.total_items, 3);
    }
}
