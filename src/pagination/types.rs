//! Pagination types and traits

use crate::error::Result;
use crate::search::SearchFilters;
use crate::types::MAX_PAGE_SIZE;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Page size used when the caller does not pick one
pub const DEFAULT_LIMIT: u32 = MAX_PAGE_SIZE;

/// Offset and limit of one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Position of the first record in the full result ordering
    pub offset: u64,
    /// Maximum number of records to return
    pub limit: u32,
}

impl PageWindow {
    /// Create a window, clamping the limit into `1..=MAX_PAGE_SIZE`
    pub fn new(offset: u64, limit: u32) -> Self {
        Self {
            offset,
            limit: Self::clamp_limit(limit),
        }
    }

    /// Clamp a requested page size to what the API accepts
    pub fn clamp_limit(limit: u32) -> u32 {
        limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// The window following a page of `count` records
    #[must_use]
    pub fn advance(self, count: usize) -> Self {
        Self {
            offset: self.offset + count as u64,
            limit: self.limit,
        }
    }

    /// Query pairs for this window
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ]
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

/// One page returned by the search endpoint
///
/// Deserializes from the search response body `{"rows": [...], "total": N}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records in the order the API returned them
    #[serde(rename = "rows", default = "Vec::new")]
    pub records: Vec<T>,
    /// Total matches reported with this page
    #[serde(default)]
    pub total: u64,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(records: Vec<T>, total: u64) -> Self {
        Self { records, total }
    }

    /// An empty page
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }

    /// Number of records in the page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Source of search result pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Record type of the pages
    type Record: Send;

    /// Fetch the records in `window` matching `filters`
    async fn fetch_page(
        &self,
        filters: &SearchFilters,
        window: PageWindow,
    ) -> Result<Page<Self::Record>>;
}
