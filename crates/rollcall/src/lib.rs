//! Rollcall - search, filter, sort and paginate listing views.
//!
//! A listing page takes a raw collection, narrows it with a search box,
//! dropdown filters and a time window, sorts it by a column and shows one
//! page of the result with a page control. Rollcall composes the two pieces
//! that do this:
//!
//! ```text
//! raw records → ListQuery (filter, then sort) → Pager (slice) → PageView
//! ```
//!
//! - [`ListQuery`] (from `rollcall-query`) is the declarative filter and sort
//!   pipeline.
//! - [`Pager`] (from `rollcall-pager`) keeps the current page in range and
//!   computes the page-index sequence.
//! - [`paginate`] runs both and returns a serializable [`PageView`].
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rollcall::{paginate_records, ListQuery, PageRequest, Record, TimeWindow};
//!
//! #[derive(Record)]
//! struct Opportunity {
//!     title: String,
//!     status: String,
//!     points: u32,
//!     #[record(rename = "createdAt")]
//!     created_at: chrono::DateTime<Utc>,
//! }
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
//! let records: Vec<Opportunity> = (0..30)
//!     .map(|i| Opportunity {
//!         title: format!("Opportunity {i}"),
//!         status: if i % 3 == 0 { "closed".into() } else { "open".into() },
//!         points: i,
//!         created_at: now - chrono::Duration::days(i64::from(i)),
//!     })
//!     .collect();
//!
//! let query = ListQuery::new()
//!     .filter(Opportunity::STATUS, "open")
//!     .time_window(TimeWindow::Last28d)
//!     .sort_desc(Opportunity::CREATED_AT)
//!     .build();
//!
//! let view = paginate_records(&records, &query, PageRequest::new(2, 5), &now);
//! assert_eq!(view.total_items, 19);
//! assert_eq!(view.total_pages, 4);
//! assert_eq!(view.summary(), "Showing 6–10 of 19");
//! ```
//!
//! The derive emits paths into `rollcall_query`, so crates using
//! `#[derive(Record)]` depend on `rollcall-query` alongside `rollcall`.
//!
//! # Features
//!
//! - `derive` (default): re-exports `#[derive(Record)]`.
//! - `json` (default): `serde_json::Value` implements [`Record`], reading
//!   dotted paths through nested objects.

mod request;
mod view;

pub use request::PageRequest;
pub use view::{paginate, paginate_records, paginate_with_clock, PageView};

// Re-export the pager
pub use rollcall_pager::{
    clamp_page, clamp_page_f64, compute_total_pages, page_bounds, page_range, visible_range,
    PageChange, PageItem, PageSize, PageSizeOptions, Pager, PagerError, Total,
    DEFAULT_SIBLING_COUNT,
};

// Re-export the query pipeline
pub use rollcall_query::{
    collate, compare_records, compare_values, matches_equality, matches_search,
    matches_time_window, sort_records, window_start, CaseMatch, Clock, Dir, EqualityFilter,
    FieldValue, FixedClock, ListQuery, Number, OrderBy, QueryError, Record, SystemClock,
    TimeWindow, Timestamp, Value, WeekStart, WindowBounds, DAY_MS, DEFAULT_TIMESTAMP_FIELD,
};

#[cfg(feature = "derive")]
pub use rollcall_macros::Record;
