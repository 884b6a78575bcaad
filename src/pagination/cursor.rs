//! Iteration state shared by the blocking and async front ends

use super::types::{Page, PageWindow};
use crate::search::SearchFilters;
use std::collections::VecDeque;
use tracing::debug;

/// What the driver of a cursor should do next
#[derive(Debug, PartialEq, Eq)]
pub enum Step<T> {
    /// Hand this record to the consumer
    Yield(T),
    /// Fetch the page at this window, then call `accept` or `fail`
    Fetch(PageWindow),
    /// The sequence has ended
    Done,
}

/// Position of one in-progress search
#[derive(Debug)]
pub struct SearchCursor<T> {
    filters: SearchFilters,
    window: PageWindow,
    buffer: VecDeque<T>,
    last_total: Option<u64>,
    pages_fetched: usize,
    done: bool,
}

impl<T> SearchCursor<T> {
    /// Create a cursor starting at `offset`
    ///
    /// `limit` is clamped to the API maximum.
    pub fn new(filters: SearchFilters, limit: u32, offset: u64) -> Self {
        Self {
            filters,
            window: PageWindow::new(offset, limit),
            buffer: VecDeque::new(),
            last_total: None,
            pages_fetched: 0,
            done: false,
        }
    }

    /// Filters sent with every page
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Window of the next page fetch
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Offset of the next record to be yielded
    ///
    /// Starting a new search at this offset resumes where this one stopped.
    pub fn position(&self) -> u64 {
        self.window.offset - self.buffer.len() as u64
    }

    /// Total reported by the most recent page, if any page was fetched
    pub fn last_total(&self) -> Option<u64> {
        self.last_total
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Check if the sequence has ended
    pub fn is_done(&self) -> bool {
        self.done && self.buffer.is_empty()
    }

    /// Decide the next step
    pub fn step(&mut self) -> Step<T> {
        if let Some(record) = self.buffer.pop_front() {
            return Step::Yield(record);
        }
        if self.done {
            return Step::Done;
        }
        Step::Fetch(self.window)
    }

    /// Take in a fetched page
    pub fn accept(&mut self, page: Page<T>) {
        self.pages_fetched += 1;
        self.last_total = Some(page.total);

        debug!(
            "Fetched page {} at offset {} (limit {}): {} records, total {}",
            self.pages_fetched,
            self.window.offset,
            self.window.limit,
            page.len(),
            page.total
        );

        if page.is_empty() {
            self.done = true;
            return;
        }

        self.window = self.window.advance(page.len());
        self.buffer.extend(page.records);
    }

    /// Record a failed fetch; the sequence ends
    pub fn fail(&mut self) {
        self.done = true;
        self.buffer.clear();
    }
}
