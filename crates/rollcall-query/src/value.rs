//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the runtime value of a field extracted from a
//! record. It covers the shapes listed records carry: strings, numbers,
//! timestamps and booleans, with [`Value::None`] for anything missing.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Runtime value for comparison, borrowed from the source record.
///
/// The accessor function provided to query methods returns this type.
///
/// # Example
///
/// ```
/// use rollcall_query::{Value, Number};
///
/// struct Payment {
///     payer: String,
///     amount: u32,
/// }
///
/// fn accessor<'a>(payment: &'a Payment, field: &str) -> Value<'a> {
///     match field {
///         "payer" => Value::String(&payment.payer),
///         "amount" => Value::Number(Number::U64(payment.amount as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns the text form used for free-text search and equality filters.
    ///
    /// Strings are borrowed as-is, numbers and booleans are formatted, and
    /// timestamps render as RFC 3339 in UTC. `None` has no text form.
    pub fn search_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Timestamp(ts) => ts.to_rfc3339().map(Cow::Owned),
            Value::None => None,
        }
    }

    /// Resolves this value to a timestamp for time-window filtering.
    ///
    /// Timestamps pass through, numbers are read as epoch milliseconds and
    /// strings are parsed with [`Timestamp::parse`]. Anything missing or
    /// unparseable resolves to the epoch.
    pub fn to_timestamp(&self) -> Timestamp {
        match self {
            Value::Timestamp(ts) => *ts,
            Value::Number(n) => Timestamp(n.to_f64() as i64),
            Value::String(s) => Timestamp::parse(s).unwrap_or(Timestamp::EPOCH),
            Value::Bool(_) | Value::None => Timestamp::EPOCH,
        }
    }
}

/// A field's numeric value.
///
/// Integers keep their sign class so large values compare exactly; anything
/// mixed goes through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Widens to `f64`; used for mixed comparisons and epoch-millis reads.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Numeric ordering; `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::U64(a), Number::I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(impl From<$ty> for Number {
            fn from(n: $ty) -> Self {
                Number::$variant(n as $wide)
            }
        })*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// This is timezone-agnostic; calendar-relative windows are resolved against
/// the timezone of the "now" they are evaluated with.
///
/// ```
/// use rollcall_query::Timestamp;
///
/// let ts = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
/// assert_eq!(ts.as_millis(), 1_704_067_200_000);
/// assert!(Timestamp(1000) < Timestamp(2000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// The Unix epoch, used for missing or unparseable timestamps.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Milliseconds since the Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parses the timestamp formats REST payloads carry.
    ///
    /// Accepted, in order: RFC 3339 with an offset, a date-time without an
    /// offset (`T` or space separated, read as UTC), and a bare `YYYY-MM-DD`
    /// date (UTC midnight).
    pub fn parse(s: &str) -> Option<Timestamp> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Timestamp(naive.and_utc().timestamp_millis()));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|date| Timestamp(date.and_time(Default::default()).and_utc().timestamp_millis()))
    }

    fn to_rfc3339(self) -> Option<String> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}
