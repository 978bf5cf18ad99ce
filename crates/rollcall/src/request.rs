//! Page requests as they arrive from URL query parameters.

use rollcall_pager::PageSize;
use serde::{Deserialize, Serialize};

/// The page a caller asks for.
///
/// Values are taken as given and normalized when the request is applied: a
/// page below 1 becomes 1, a page past the end becomes the last page and a
/// page size below 1 becomes 1.
///
/// ```
/// use rollcall::PageRequest;
///
/// let request: PageRequest = serde_json::from_str(r#"{"page": 3}"#).unwrap();
/// assert_eq!(request.page, 3);
/// assert_eq!(request.page_size.get(), 10);
///
/// let request: PageRequest = serde_json::from_str(r#"{"pageSize": -4}"#).unwrap();
/// assert_eq!(request.page_size.get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    /// Requested 1-based page.
    pub page: i64,
    /// Requested page size.
    pub page_size: PageSize,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        PageRequest {
            page,
            page_size: PageSize::new(page_size),
        }
    }

    /// Page 1 at the given size.
    pub fn first(page_size: i64) -> Self {
        PageRequest::new(1, page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: PageSize::DEFAULT,
        }
    }
}
