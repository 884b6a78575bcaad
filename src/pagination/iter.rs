//! Blocking iterator and async stream over paginated search results

use super::cursor::{SearchCursor, Step};
use super::types::{Page, PageFetcher, PageWindow};
use crate::error::Result;
use crate::search::SearchFilters;
use futures::stream::{self, BoxStream, StreamExt};
use std::iter::FusedIterator;

/// Async stream of search results
pub type SearchStream<'a, T> = BoxStream<'a, Result<T>>;

/// Blocking, lazy iterator over paginated search results
///
/// Each call to `next` either returns a buffered record or calls the
/// fetch function once for the next page. After an `Err` is returned
/// the iterator yields `None`.
pub struct SearchIter<T, F> {
    cursor: SearchCursor<T>,
    fetch: F,
}

impl<T, F> SearchIter<T, F>
where
    F: FnMut(&SearchFilters, PageWindow) -> Result<Page<T>>,
{
    /// Create an iterator starting at `offset`
    pub fn new(filters: SearchFilters, limit: u32, offset: u64, fetch: F) -> Self {
        Self {
            cursor: SearchCursor::new(filters, limit, offset),
            fetch,
        }
    }

    /// Iteration state, e.g. to read the resume offset after an error
    pub fn cursor(&self) -> &SearchCursor<T> {
        &self.cursor
    }
}

impl<T, F> Iterator for SearchIter<T, F>
where
    F: FnMut(&SearchFilters, PageWindow) -> Result<Page<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cursor.step() {
                Step::Yield(record) => return Some(Ok(record)),
                Step::Done => return None,
                Step::Fetch(window) => match (self.fetch)(self.cursor.filters(), window) {
                    Ok(page) => self.cursor.accept(page),
                    Err(e) => {
                        self.cursor.fail();
                        return Some(Err(e));
                    }
                },
            }
        }
    }
}

impl<T, F> FusedIterator for SearchIter<T, F> where
    F: FnMut(&SearchFilters, PageWindow) -> Result<Page<T>>
{
}

impl<T, F> std::fmt::Debug for SearchIter<T, F>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIter")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

/// Iterate over all results of a search with a blocking fetch function
pub fn iterate<T, F>(filters: SearchFilters, limit: u32, offset: u64, fetch: F) -> SearchIter<T, F>
where
    F: FnMut(&SearchFilters, PageWindow) -> Result<Page<T>>,
{
    SearchIter::new(filters, limit, offset, fetch)
}

/// Stream all results of a search from a [`PageFetcher`]
///
/// Pages are fetched on demand, one request in flight at most. Dropping
/// the stream abandons the search without further requests.
pub fn paginate<'a, P>(
    fetcher: &'a P,
    filters: SearchFilters,
    limit: u32,
    offset: u64,
) -> SearchStream<'a, P::Record>
where
    P: PageFetcher + ?Sized,
    P::Record: 'a,
{
    let cursor = SearchCursor::new(filters, limit, offset);

    stream::unfold(cursor, move |mut cursor| async move {
        loop {
            match cursor.step() {
                Step::Yield(record) => return Some((Ok(record), cursor)),
                Step::Done => return None,
                Step::Fetch(window) => {
                    let fetched = fetcher.fetch_page(cursor.filters(), window).await;
                    match fetched {
                        Ok(page) => cursor.accept(page),
                        Err(e) => {
                            cursor.fail();
                            return Some((Err(e), cursor));
                        }
                    }
                }
            }
        }
    })
    .boxed()
}
