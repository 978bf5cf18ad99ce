//! Error types for the pager crate.

use thiserror::Error;

/// Errors raised when parsing pager settings from text.
///
/// The paging computations themselves never fail; these only surface when a
/// caller asks for strict parsing (for example a CLI flag or a config value).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagerError {
    /// The page size is not an integer.
    #[error("invalid page size '{0}': expected an integer")]
    InvalidPageSize(String),

    /// A page-size option list could not be parsed.
    #[error("invalid page size options '{0}': expected comma-separated integers")]
    InvalidPageSizeOptions(String),
}

/// Result type for pager operations.
pub type Result<T> = std::result::Result<T, PagerError>;
