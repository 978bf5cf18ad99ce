//! Page sizes and the option set offered to users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PagerError, Result};

/// Number of items shown per page. Always at least 1.
///
/// Construction never fails: zero and negative sizes are raised to 1.
///
/// ```
/// use rollcall_pager::PageSize;
///
/// assert_eq!(PageSize::new(20).get(), 20);
/// assert_eq!(PageSize::new(0).get(), 1);
/// assert_eq!(PageSize::new(-5).get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// The size used when a caller does not pick one.
    pub const DEFAULT: PageSize = PageSize(10);

    /// Creates a page size, normalizing anything below 1 to 1.
    pub fn new(size: i64) -> Self {
        if size < 1 {
            PageSize(1)
        } else {
            PageSize(usize::try_from(size).unwrap_or(usize::MAX))
        }
    }

    /// Creates a page size from an unsigned count, raising 0 to 1.
    pub fn from_usize(size: usize) -> Self {
        PageSize(size.max(1))
    }

    /// Returns the size as a plain count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::DEFAULT
    }
}

impl From<i64> for PageSize {
    fn from(size: i64) -> Self {
        PageSize::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageSize {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(PageSize::new)
            .map_err(|_| PagerError::InvalidPageSize(s.to_string()))
    }
}

/// The ordered set of page sizes a listing offers.
///
/// Defaults to `10, 20, 50, 100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<usize>")]
pub struct PageSizeOptions(Vec<PageSize>);

impl PageSizeOptions {
    /// Builds an option set. Sizes are normalized, sorted and deduplicated;
    /// an empty input falls back to the defaults.
    pub fn new<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut sizes: Vec<PageSize> = sizes.into_iter().map(PageSize::new).collect();
        sizes.sort();
        sizes.dedup();
        if sizes.is_empty() {
            return PageSizeOptions::default();
        }
        PageSizeOptions(sizes)
    }

    /// Returns `true` if `size` is one of the offered options.
    pub fn contains(&self, size: PageSize) -> bool {
        self.0.contains(&size)
    }

    /// Iterates the options in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PageSize> + '_ {
        self.0.iter().copied()
    }

    /// Returns the offered option closest to `size`; ties go to the smaller one.
    pub fn nearest(&self, size: PageSize) -> PageSize {
        self.0
            .iter()
            .copied()
            .min_by_key(|option| option.get().abs_diff(size.get()))
            .unwrap_or_default()
    }

    /// Returns the smallest offered option.
    pub fn first(&self) -> PageSize {
        self.0.first().copied().unwrap_or_default()
    }
}

impl Default for PageSizeOptions {
    fn default() -> Self {
        PageSizeOptions(vec![
            PageSize(10),
            PageSize(20),
            PageSize(50),
            PageSize(100),
        ])
    }
}

impl From<Vec<i64>> for PageSizeOptions {
    fn from(sizes: Vec<i64>) -> Self {
        PageSizeOptions::new(sizes)
    }
}

impl From<PageSizeOptions> for Vec<usize> {
    fn from(options: PageSizeOptions) -> Self {
        options.0.into_iter().map(PageSize::get).collect()
    }
}

impl FromStr for PageSizeOptions {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self> {
        let sizes = s
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| PagerError::InvalidPageSizeOptions(s.to_string()))?;
        Ok(PageSizeOptions::new(sizes))
    }
}
