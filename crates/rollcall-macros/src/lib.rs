//! Proc macros for rollcall.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate named-field access for the list query pipeline
//!
//! # Examples
//!
//! For working examples, see `rollcall/tests/record_derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for listable structs.
///
/// This macro generates an implementation of `rollcall_query::Record`, so a
/// struct can be searched, filtered, windowed and sorted by field name. Every
/// field is exposed through `rollcall_query::FieldValue`; fields whose type
/// does not implement it must be skipped.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Use a custom name for queries |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Student::NAME`, `Student::CREATED_AT`)
/// 2. Implementation of `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use rollcall_macros::Record;
/// use rollcall_query::{ListQuery, Record, TimeWindow};
///
/// #[derive(Record)]
/// struct Student {
///     name: String,
///     branch: String,
///     points: u32,
///
///     #[record(rename = "createdAt")]
///     created_at: chrono::DateTime<chrono::Utc>,
///
///     #[record(skip)]
///     password_hash: Vec<u8>,
/// }
///
/// let query = ListQuery::new()
///     .search("ada")
///     .search_field(Student::NAME)
///     .filter(Student::BRANCH, "CS")
///     .time_window(TimeWindow::ThisMonth)
///     .sort_desc(Student::POINTS)
///     .build();
///
/// let results = query.apply(&students, &chrono::Utc::now(), Student::accessor);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
