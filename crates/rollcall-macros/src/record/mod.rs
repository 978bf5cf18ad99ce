//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates named-field access for the list query pipeline and field-name
//! constants from struct annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
