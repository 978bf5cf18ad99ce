//! Search and equality predicates.
//!
//! Listing pages narrow a collection with a free-text search box over a few
//! named fields and with dropdowns that pin a field to one value (status,
//! branch, college). Both predicates are inactive when their input is empty.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::value::Value;

/// How an equality filter compares text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseMatch {
    /// Exact, case-sensitive comparison.
    #[default]
    Sensitive,
    /// Comparison after lower-casing both sides.
    Insensitive,
}

/// Requires a record field to equal an expected value.
///
/// Values are compared through their text form ([`Value::search_text`]), so
/// `"5"` matches the number 5 and `"true"` matches a boolean field. An empty
/// `expected` value makes the filter inactive.
///
/// ```
/// use rollcall_query::{EqualityFilter, Value};
///
/// let filter: EqualityFilter = "status=approved".parse().unwrap();
/// assert!(filter.matches(&Value::String("approved")));
/// assert!(!filter.matches(&Value::String("Approved")));
/// assert!(filter.ignore_case().matches(&Value::String("Approved")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualityFilter {
    /// The field to compare.
    pub field: String,
    /// The value the field must equal; empty disables the filter.
    #[serde(default)]
    pub expected: String,
    /// Case handling for the comparison.
    #[serde(default)]
    pub case: CaseMatch,
}

impl EqualityFilter {
    /// Creates a case-sensitive filter.
    pub fn new(field: impl Into<String>, expected: impl Into<String>) -> Self {
        EqualityFilter {
            field: field.into(),
            expected: expected.into(),
            case: CaseMatch::Sensitive,
        }
    }

    /// Switches the filter to case-insensitive comparison.
    pub fn ignore_case(mut self) -> Self {
        self.case = CaseMatch::Insensitive;
        self
    }

    /// Returns `false` when the expected value is empty.
    pub fn is_active(&self) -> bool {
        !self.expected.is_empty()
    }

    /// Tests a field value against this filter.
    ///
    /// Inactive filters match everything; a missing field never matches an
    /// active filter.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(text) = field_value.search_text() else {
            return false;
        };
        match self.case {
            CaseMatch::Sensitive => text == self.expected.as_str(),
            CaseMatch::Insensitive => text.to_lowercase() == self.expected.to_lowercase(),
        }
    }
}

impl FromStr for EqualityFilter {
    type Err = QueryError;

    /// Parses `field=value`. The value may be empty (inactive filter) and may
    /// itself contain `=`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((field, expected)) if !field.trim().is_empty() => {
                Ok(EqualityFilter::new(field.trim(), expected))
            }
            _ => Err(QueryError::InvalidFilter(s.to_string())),
        }
    }
}

/// Tests whether any of `search_fields` contains `query`, ignoring case.
///
/// An empty query matches every record. Fields without a text form (missing
/// or null) never match.
pub fn matches_search<T, F, S>(item: &T, query: &str, search_fields: &[S], accessor: F) -> bool
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    S: AsRef<str>,
{
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    search_fields.iter().any(|field| {
        accessor(item, field.as_ref())
            .search_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    })
}

/// Tests a record against every filter; inactive filters are skipped.
pub fn matches_equality<T, F>(item: &T, filters: &[EqualityFilter], accessor: F) -> bool
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    filters
        .iter()
        .filter(|filter| filter.is_active())
        .all(|filter| filter.matches(&accessor(item, &filter.field)))
}
