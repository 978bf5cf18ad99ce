//! Ordering types for query result sorting.
//!
//! Provides [`Dir`] for sort direction, [`OrderBy`] for field-based ordering
//! and the stable [`sort_records`] used by the list pipeline.

use std::cmp::Ordering;
use std::str::FromStr;

use deunicode::deunicode;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{QueryError, Result};
use crate::value::{Number, Timestamp, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }

    /// Parses a direction, falling back to ascending for unknown tokens.
    pub fn parse(token: &str) -> Dir {
        token.parse().unwrap_or_else(|_| {
            tracing::debug!(token, "unknown sort direction, using asc");
            Dir::Asc
        })
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(QueryError::UnknownSortDirection(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Dir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Dir::parse(&token))
    }
}

/// A single ordering clause specifying a field and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this ordering.
    ///
    /// The descending case reverses the ascending result rather than using a
    /// separate comparator, so ties stay ties in both directions.
    pub fn compare<'a>(&self, a: &Value<'a>, b: &Value<'a>) -> Ordering {
        self.dir.apply(compare_values(a, b))
    }
}

/// Compares strings the way a listing UI sorts names.
///
/// Accents are folded and case is ignored for the primary comparison; exact
/// code-point order only breaks ties, so "émile" sorts between "Emil" and
/// "Emma" instead of after "Zoe".
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded_a = deunicode(a).to_lowercase();
    let folded_b = deunicode(b).to_lowercase();
    folded_a.cmp(&folded_b).then_with(|| a.cmp(b))
}

/// A value reduced to what sorting looks at.
///
/// Strings that read as timestamps become instants, so ISO dates held as
/// text sort by time whatever their offset or precision.
#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Bool(bool),
    Number(Number),
    Instant(Timestamp),
    Text(&'a str),
    Missing,
}

impl<'a> SortKey<'a> {
    fn of(value: &Value<'a>) -> Self {
        match *value {
            Value::Bool(b) => SortKey::Bool(b),
            Value::Number(n) => SortKey::Number(n),
            Value::Timestamp(ts) => SortKey::Instant(ts),
            Value::String(s) => Timestamp::parse(s).map_or(SortKey::Text(s), SortKey::Instant),
            Value::None => SortKey::Missing,
        }
    }

    // Kinds order booleans, numbers, instants, text, then missing values.
    fn rank(self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Instant(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Missing => 4,
        }
    }
}

/// Compares two field values in ascending order.
///
/// Numbers and timestamps compare numerically, as do strings that parse with
/// [`Timestamp::parse`]; other strings go through [`collate`]. Values of
/// different kinds order by kind, with missing values last, and NaN sorts
/// above every other number, so the result is a total order.
pub fn compare_values<'a>(a: &Value<'a>, b: &Value<'a>) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(&b),
        (SortKey::Number(a), SortKey::Number(b)) => a
            .compare(b)
            .unwrap_or_else(|| a.to_f64().total_cmp(&b.to_f64())),
        (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(&b),
        (SortKey::Text(a), SortKey::Text(b)) => collate(a, b),
        (a, b) => a.rank().cmp(&b.rank()),
    }
}

/// Compares two records by one ordering clause.
pub fn compare_records<T, F>(a: &T, b: &T, order_by: &OrderBy, accessor: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    let val_a = accessor(a, &order_by.field);
    let val_b = accessor(b, &order_by.field);
    order_by.compare(&val_a, &val_b)
}

/// Returns references to `items` in stable sorted order.
///
/// An unknown sort field yields `Value::None` for every record, which leaves
/// the input order unchanged.
pub fn sort_records<'a, T, F>(items: &'a [T], order_by: &OrderBy, accessor: F) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut refs: Vec<&'a T> = items.iter().collect();
    sort_refs(&mut refs, order_by, &accessor);
    refs
}

pub(crate) fn sort_refs<T, F>(refs: &mut [&T], order_by: &OrderBy, accessor: &F)
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    // slice::sort_by is stable
    refs.sort_by(|a, b| compare_records(*a, *b, order_by, accessor));
}
