//! Error types for the query crate.

use thiserror::Error;

/// Errors raised by strict parsing of query settings.
///
/// Query evaluation never fails; these only come from the `FromStr`
/// implementations, for callers that want to reject bad tokens instead of
/// falling back to "no effect".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Time-window token outside the recognized set.
    #[error("unknown time window '{0}': expected one of '', last24h, last7d, last28d, thisWeek, thisMonth, thisYear, all")]
    UnknownTimeWindow(String),

    /// Sort direction other than `asc` or `desc`.
    #[error("unknown sort direction '{0}': expected asc or desc")]
    UnknownSortDirection(String),

    /// Week start other than `sunday` or `monday`.
    #[error("unknown week start '{0}': expected sunday or monday")]
    UnknownWeekStart(String),

    /// Equality filter not in `field=value` form.
    #[error("invalid filter '{0}': expected field=value")]
    InvalidFilter(String),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
