//! Pager - page window computation for listing views.
//!
//! Given a current page, a total (items or pages) and a page size, the pager
//! keeps the position inside the valid window, answers navigation requests
//! and produces the compact page-index sequence a listing renders:
//!
//! - Total page computation with a floor of one page
//! - Silent clamping of out-of-range and malformed requests
//! - Page-index sequences with ellipsis markers
//! - "Showing X–Y of Z" ranges and slice bounds
//! - Page-size changes that always return to page 1
//!
//! Every operation is total: bad input is normalized, never reported.
//!
//! # Quick Start
//!
//! ```rust
//! use rollcall_pager::{Pager, PageItem};
//!
//! let records: Vec<u32> = (1..=200).collect();
//!
//! let mut pager = Pager::with_total_items(records.len()).page_size(10);
//! pager.go_to_page(5);
//!
//! assert_eq!(pager.slice(&records).first(), Some(&41));
//! assert_eq!(pager.visible_range(), (41, 50));
//!
//! let links: Vec<String> = pager.page_range().iter().map(PageItem::to_string).collect();
//! assert_eq!(links, ["1", "...", "4", "5", "6", "...", "20"]);
//! ```

mod error;
mod pager;
mod range;
mod size;

pub use error::{PagerError, Result};
pub use pager::{
    clamp_page, clamp_page_f64, compute_total_pages, page_bounds, visible_range, PageChange, Pager,
    Total,
};
pub use range::{page_range, PageItem, DEFAULT_SIBLING_COUNT};
pub use size::{PageSize, PageSizeOptions};
