//! Page-number pagination for article listings.
//!
//! Listings are paged by a 1-indexed `page` query parameter and a server-side
//! page size. The full, filtered result set is always known, so the window is
//! computed in memory:
//!
//! - `start = (page - 1) * page_size`
//! - `end = min(total, page * page_size)`
//! - a page past the end is empty but still reports the true total
//!
//! # Example
//!
//! ```ignore
//! use trilium_blog_core::pagination::{PageQuery, PageWindow};
//!
//! // GET /api/articles?page=3
//! let page = query.page();
//! let window = PageWindow::new(page, 10, articles.len());
//! let slice = &articles[window.range()];
//! ```

use std::ops::Range;

use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

/// Deserializes an optional page number, treating empty or unparsable
/// values as absent rather than rejecting the request.
fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Query parameters for paged listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    pub page: Option<i64>,
}

impl PageQuery {
    /// Returns the effective page, falling back to 1 for missing or
    /// non-positive values.
    #[must_use]
    pub fn page(&self) -> usize {
        match self.page {
            Some(page) if page >= 1 => usize::try_from(page).unwrap_or(usize::MAX),
            _ => 1,
        }
    }
}

/// Number of pages needed to show `total` items, `page_size` at a time.
#[must_use]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// A single page over a result set of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total,
        }
    }

    /// Index of the first item on this page, which may be past `total`.
    #[must_use]
    pub fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Slice bounds for this page, clamped to the result set.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.start();
        if start >= self.total {
            return self.total..self.total;
        }
        let end = start.saturating_add(self.page_size).min(self.total);
        start..end
    }

    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.start() >= self.total
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }
}
