//! Pagination module
//!
//! Walks the offset-based search endpoint and presents the results as a
//! single lazy sequence.
//!
//! # Overview
//!
//! A [`SearchCursor`] tracks the next [`PageWindow`] and the unconsumed
//! remainder of the current page. Two front ends drive it:
//!
//! - [`SearchIter`] - a blocking [`Iterator`] over any fetch function
//! - [`SearchStream`] - an async stream over a [`PageFetcher`]
//!
//! Both fetch one page at a time and only when the buffer is empty.
//! A zero-length page is the only end-of-results signal; the reported
//! total is informational. A failed fetch is yielded once as `Err` and
//! ends the sequence. Neither front end may be shared between consumers.

mod cursor;
mod iter;
mod types;

pub use cursor::{SearchCursor, Step};
pub use iter::{iterate, paginate, SearchIter, SearchStream};
pub use types::{Page, PageFetcher, PageWindow, DEFAULT_LIMIT};

#[cfg(test)]
mod tests;
