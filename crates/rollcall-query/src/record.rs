//! Record access traits.
//!
//! [`Record`] is the named-field view the query engine needs from a listed
//! item. It is usually derived with `#[derive(Record)]` from
//! `rollcall-macros`, implemented by hand, or taken from the blanket
//! implementations for string-keyed maps (and `serde_json::Value` with the
//! `json` feature). [`FieldValue`] converts individual field types into
//! [`Value`]s and is what the derive calls for every field.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::value::{Number, Timestamp, Value};

/// Trait for items that can be listed, filtered and sorted.
///
/// # Derive Usage
///
/// ```ignore
/// use rollcall_macros::Record;
///
/// #[derive(Record)]
/// struct Opportunity {
///     title: String,
///     status: String,
///     #[record(rename = "createdAt")]
///     created_at: chrono::DateTime<chrono::Utc>,
///     #[record(skip)]
///     body_html: String,
/// }
///
/// assert_eq!(Opportunity::CREATED_AT, "createdAt");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use rollcall_query::{Record, Value, Number};
///
/// struct Redemption {
///     user: String,
///     points: u32,
/// }
///
/// impl Record for Redemption {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "user" => Value::String(&self.user),
///             "points" => Value::Number(Number::U64(self.points as u64)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field for filtering and sorting.
    ///
    /// Unknown fields return [`Value::None`].
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for [`ListQuery::apply`].
    ///
    /// [`ListQuery::apply`]: crate::ListQuery::apply
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Conversion from a field's type to a [`Value`].
///
/// Implemented for strings, integers, floats, booleans, [`Timestamp`],
/// chrono date and date-time types and `Option`s of those.
pub trait FieldValue {
    /// Borrows this field as a [`Value`].
    fn to_value(&self) -> Value<'_>;
}

impl FieldValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::None,
        }
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! numeric_field_value {
    ($($ty:ty),*) => {
        $(impl FieldValue for $ty {
            fn to_value(&self) -> Value<'_> {
                Value::Number(Number::from(*self))
            }
        })*
    };
}

numeric_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl FieldValue for Timestamp {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl<Tz: TimeZone> FieldValue for DateTime<Tz> {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp(self.timestamp_millis()))
    }
}

impl FieldValue for NaiveDateTime {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp(self.and_utc().timestamp_millis()))
    }
}

impl FieldValue for NaiveDate {
    fn to_value(&self) -> Value<'_> {
        let midnight = self.and_time(Default::default()).and_utc();
        Value::Timestamp(Timestamp(midnight.timestamp_millis()))
    }
}

impl<V: FieldValue, S: BuildHasher> Record for HashMap<String, V, S> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, FieldValue::to_value)
    }
}

impl<V: FieldValue> Record for BTreeMap<String, V> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, FieldValue::to_value)
    }
}

#[cfg(feature = "json")]
mod json {
    use serde_json::Value as Json;

    use super::{FieldValue, Record};
    use crate::value::{Number, Value};

    impl FieldValue for Json {
        fn to_value(&self) -> Value<'_> {
            match self {
                Json::String(s) => Value::String(s),
                Json::Bool(b) => Value::Bool(*b),
                Json::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Value::Number(Number::I64(i))
                    } else if let Some(u) = n.as_u64() {
                        Value::Number(Number::U64(u))
                    } else {
                        n.as_f64()
                            .map_or(Value::None, |f| Value::Number(Number::F64(f)))
                    }
                }
                Json::Null | Json::Array(_) | Json::Object(_) => Value::None,
            }
        }
    }

    /// JSON records resolve dotted paths through nested objects, so
    /// `"college.name"` reads `{"college": {"name": ...}}`. Numeric segments
    /// index into arrays.
    impl Record for Json {
        fn field_value(&self, field: &str) -> Value<'_> {
            let mut current = self;
            for segment in field.split('.') {
                let next = match current {
                    Json::Object(map) => map.get(segment),
                    Json::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                    _ => None,
                };
                match next {
                    Some(value) => current = value,
                    None => return Value::None,
                }
            }
            current.to_value()
        }
    }
}
