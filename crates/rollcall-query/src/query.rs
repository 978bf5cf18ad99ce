//! List query builder and executor.
//!
//! The [`ListQuery`] struct provides a fluent builder API for the settings a
//! listing page exposes (search box, dropdown filters, time window, sort
//! column) and methods for running them against collections.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::filter::{matches_equality, matches_search, EqualityFilter};
use crate::ordering::{sort_refs, Dir, OrderBy};
use crate::value::Value;
use crate::window::{TimeWindow, WeekStart, WindowBounds};

/// Field read by the time window unless configured otherwise.
pub const DEFAULT_TIMESTAMP_FIELD: &str = "createdAt";

/// A declarative filter and sort pipeline for one listing.
///
/// A record is kept when it satisfies every active predicate:
///
/// ```text
/// keep = search matches any search field (or search is empty)
///      ∧ every active equality filter matches
///      ∧ the timestamp field falls inside the time window
/// ```
///
/// Kept records are then stably sorted by the sort field, if one is set.
///
/// The struct (de)serializes with the camelCase keys listing pages persist
/// in their URLs: `search`, `searchFields`, `filters`, `timeWindow`,
/// `timestampField`, `weekStart`, `sortBy` and `sortOrder`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rollcall_query::{ListQuery, Number, TimeWindow, Value};
///
/// struct Student {
///     name: String,
///     branch: String,
///     points: i64,
///     created_ms: i64,
/// }
///
/// fn accessor<'a>(s: &'a Student, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&s.name),
///         "branch" => Value::String(&s.branch),
///         "points" => Value::Number(Number::I64(s.points)),
///         "createdAt" => Value::Number(Number::I64(s.created_ms)),
///         _ => Value::None,
///     }
/// }
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
/// let day = 86_400_000;
/// let students = vec![
///     Student { name: "Ada".into(), branch: "CS".into(), points: 40, created_ms: now.timestamp_millis() - day },
///     Student { name: "Alan".into(), branch: "CS".into(), points: 90, created_ms: now.timestamp_millis() - 2 * day },
///     Student { name: "Grace".into(), branch: "EE".into(), points: 70, created_ms: now.timestamp_millis() - day },
///     Student { name: "Alonzo".into(), branch: "CS".into(), points: 60, created_ms: now.timestamp_millis() - 30 * day },
/// ];
///
/// let query = ListQuery::new()
///     .search("al")
///     .search_field("name")
///     .filter("branch", "CS")
///     .time_window(TimeWindow::Last7d)
///     .sort_desc("points")
///     .build();
///
/// let results = query.apply(&students, &now, accessor);
/// let names: Vec<&str> = results.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Alan"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    search: String,
    search_fields: Vec<String>,
    filters: Vec<EqualityFilter>,
    time_window: TimeWindow,
    timestamp_field: String,
    week_start: WeekStart,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
    sort_order: Dir,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            search: String::new(),
            search_fields: Vec::new(),
            filters: Vec::new(),
            time_window: TimeWindow::None,
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
            week_start: WeekStart::Sunday,
            sort_by: None,
            sort_order: Dir::Asc,
        }
    }
}

impl ListQuery {
    /// Creates a query that keeps every record in input order.
    pub fn new() -> Self {
        ListQuery::default()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Sets the free-text search. Empty text matches everything.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Adds a field to test the search text against.
    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        self.search_fields.push(field.into());
        self
    }

    /// Adds several search fields at once.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    // ========================================================================
    // Equality filters
    // ========================================================================

    /// Adds a case-sensitive equality filter. An empty value is inactive.
    pub fn filter(self, field: impl Into<String>, expected: impl Into<String>) -> Self {
        self.equality(EqualityFilter::new(field, expected))
    }

    /// Adds a case-insensitive equality filter.
    pub fn filter_ignore_case(self, field: impl Into<String>, expected: impl Into<String>) -> Self {
        self.equality(EqualityFilter::new(field, expected).ignore_case())
    }

    /// Adds a prepared equality filter.
    pub fn equality(mut self, filter: EqualityFilter) -> Self {
        self.filters.push(filter);
        self
    }

    // ========================================================================
    // Time window
    // ========================================================================

    /// Sets the time window.
    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }

    /// Sets the field holding each record's timestamp.
    pub fn timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = field.into();
        self
    }

    /// Sets the first day of the week for [`TimeWindow::ThisWeek`].
    pub fn week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts results by a field.
    pub fn sort_by(mut self, field: impl Into<String>, dir: Dir) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = dir;
        self
    }

    /// Sorts results ascending by a field.
    pub fn sort_asc(self, field: impl Into<String>) -> Self {
        self.sort_by(field, Dir::Asc)
    }

    /// Sorts results descending by a field.
    pub fn sort_desc(self, field: impl Into<String>) -> Self {
        self.sort_by(field, Dir::Desc)
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn get_search(&self) -> &str {
        &self.search
    }

    pub fn get_search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn filters(&self) -> &[EqualityFilter] {
        &self.filters
    }

    pub fn get_time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn get_timestamp_field(&self) -> &str {
        &self.timestamp_field
    }

    pub fn get_week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Returns the sort clause, if a sort field is set.
    pub fn ordering(&self) -> Option<OrderBy> {
        self.sort_by
            .as_ref()
            .map(|field| OrderBy::new(field.clone(), self.sort_order))
    }

    /// Returns `true` if any predicate can drop a record.
    pub fn is_filtering(&self) -> bool {
        !self.search.is_empty()
            || self.filters.iter().any(EqualityFilter::is_active)
            || self.time_window.rolling_limit_ms().is_some()
            || matches!(
                self.time_window,
                TimeWindow::ThisWeek | TimeWindow::ThisMonth | TimeWindow::ThisYear
            )
    }

    /// Returns `true` if this query neither filters nor sorts.
    pub fn is_empty(&self) -> bool {
        !self.is_filtering() && self.sort_by.is_none()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item passes every active predicate.
    pub fn matches<T, F, Tz>(&self, item: &T, now: &DateTime<Tz>, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
        Tz: TimeZone,
    {
        let bounds = self.time_window.resolve(now, self.week_start);
        self.matches_within(item, bounds, &accessor)
    }

    fn matches_within<T, F>(&self, item: &T, bounds: WindowBounds, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        if !matches_search(item, &self.search, &self.search_fields, accessor) {
            return false;
        }
        if !matches_equality(item, &self.filters, accessor) {
            return false;
        }
        match bounds {
            WindowBounds::Unbounded => true,
            bounds => bounds.contains(accessor(item, &self.timestamp_field).to_timestamp()),
        }
    }

    /// Filters and sorts a slice, returning references to kept items.
    ///
    /// The input is never modified. For a fixed `now` the result is the same
    /// on every call.
    pub fn apply<'a, T, F, Tz>(&self, items: &'a [T], now: &DateTime<Tz>, accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
        Tz: TimeZone,
    {
        let bounds = self.time_window.resolve(now, self.week_start);

        let mut results: Vec<&'a T> = items
            .iter()
            .filter(|item| self.matches_within(*item, bounds, &accessor))
            .collect();

        if let Some(order_by) = self.ordering() {
            sort_refs(&mut results, &order_by, &accessor);
        }

        tracing::debug!(
            source = items.len(),
            matched = results.len(),
            window = %self.time_window,
            sort = self.sort_by.as_deref().unwrap_or(""),
            "applied list query"
        );
        results
    }

    /// Like [`ListQuery::apply`], reading "now" from a [`Clock`].
    pub fn apply_with_clock<'a, T, F, C>(&self, items: &'a [T], clock: &C, accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
        C: Clock + ?Sized,
    {
        self.apply(items, &clock.now(), accessor)
    }

    /// Filters, sorts and clones kept items.
    pub fn apply_cloned<T, F, Tz>(&self, items: &[T], now: &DateTime<Tz>, accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
        Tz: TimeZone,
    {
        self.apply(items, now, accessor).into_iter().cloned().collect()
    }

    /// Counts the items that pass every active predicate.
    pub fn count<T, F, Tz>(&self, items: &[T], now: &DateTime<Tz>, accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
        Tz: TimeZone,
    {
        let bounds = self.time_window.resolve(now, self.week_start);
        items
            .iter()
            .filter(|item| self.matches_within(*item, bounds, &accessor))
            .count()
    }
}
