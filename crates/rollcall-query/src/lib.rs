//! Filter, sort and time-window pipeline for listing pages.
//!
//! A listing page narrows a collection with a search box, a few dropdown
//! filters and a "created" time window, then sorts by a column. This crate
//! expresses that as one declarative [`ListQuery`] that runs against any
//! collection through a field accessor. It supports:
//!
//! - Case-insensitive substring search across named fields
//! - Equality filters that switch off when their value is empty
//! - Rolling (`last24h`, `last7d`, `last28d`) and calendar (`thisWeek`,
//!   `thisMonth`, `thisYear`) time windows
//! - Stable sorting with accent-folding string collation
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rollcall_query::{ListQuery, Number, TimeWindow, Value};
//!
//! // Define your data
//! struct Event {
//!     name: String,
//!     status: String,
//!     seats: i32,
//!     created_at: String,
//! }
//!
//! // Create an accessor function
//! fn accessor<'a>(event: &'a Event, field: &str) -> Value<'a> {
//!     match field {
//!         "name" => Value::String(&event.name),
//!         "status" => Value::String(&event.status),
//!         "seats" => Value::Number(Number::I64(event.seats as i64)),
//!         "createdAt" => Value::String(&event.created_at),
//!         _ => Value::None,
//!     }
//! }
//!
//! // Build and execute a query
//! let events = vec![
//!     Event { name: "Career fair".into(), status: "open".into(), seats: 120, created_at: "2024-06-10T09:00:00Z".into() },
//!     Event { name: "Resume clinic".into(), status: "open".into(), seats: 30, created_at: "2024-06-14T09:00:00Z".into() },
//!     Event { name: "Alumni mixer".into(), status: "closed".into(), seats: 80, created_at: "2024-06-12T09:00:00Z".into() },
//! ];
//!
//! let query = ListQuery::new()
//!     .filter("status", "open")
//!     .time_window(TimeWindow::ThisMonth)
//!     .sort_desc("seats")
//!     .build();
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
//! let results = query.apply(&events, &now, accessor);
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].name, "Career fair");
//! ```
//!
//! # Failure Semantics
//!
//! The pipeline never fails. Unknown sort fields leave the input order alone,
//! unknown time-window tokens mean "no restriction", and missing or
//! unparseable timestamps count as the epoch. Strict `FromStr` parsers that
//! return [`QueryError`] exist for callers that prefer to reject bad tokens.
//!
//! # Records
//!
//! Instead of writing accessors by hand, implement [`Record`] (or derive it
//! with `rollcall-macros`) and pass `T::accessor`. String-keyed maps
//! implement it already, as does `serde_json::Value` with the `json` feature.

mod clock;
mod error;
mod filter;
mod ordering;
mod query;
mod record;
mod value;
mod window;

// Re-export public API
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{QueryError, Result};
pub use filter::{matches_equality, matches_search, CaseMatch, EqualityFilter};
pub use ordering::{collate, compare_records, compare_values, sort_records, Dir, OrderBy};
pub use query::{ListQuery, DEFAULT_TIMESTAMP_FIELD};
pub use record::{FieldValue, Record};
pub use value::{Number, Timestamp, Value};
pub use window::{matches_time_window, window_start, TimeWindow, WeekStart, WindowBounds, DAY_MS};
