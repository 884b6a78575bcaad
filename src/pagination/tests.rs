//! Tests for pagination module

use super::*;
use crate::error::{Error, ErrorKind, Result};
use crate::search::SearchFilters;
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::sync::Mutex;

/// Corpus of `size` numbered records served in windows
fn serve(size: u64, window: PageWindow) -> Page<u64> {
    let start = window.offset.min(size);
    let end = (window.offset + u64::from(window.limit)).min(size);
    Page::new((start..end).collect(), size)
}

/// Fetcher that answers from a fixed script and records every window
struct ScriptedFetcher {
    pages: Mutex<Vec<Result<Page<u64>>>>,
    calls: Mutex<Vec<PageWindow>>,
}

impl ScriptedFetcher {
    fn new(pages: Vec<Result<Page<u64>>>) -> Self {
        let mut pages = pages;
        pages.reverse();
        Self {
            pages: Mutex::new(pages),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<PageWindow> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    type Record = u64;

    async fn fetch_page(&self, _filters: &SearchFilters, window: PageWindow) -> Result<Page<u64>> {
        self.calls.lock().unwrap().push(window);
        self.pages.lock().unwrap().pop().unwrap_or_else(|| Ok(Page::empty()))
    }
}

// ============================================================================
// PageWindow / Page Tests
// ============================================================================

#[test]
fn test_page_window_clamps_limit() {
    assert_eq!(PageWindow::new(0, 500).limit, 200);
    assert_eq!(PageWindow::new(0, 0).limit, 1);
    assert_eq!(PageWindow::new(10, 50), PageWindow { offset: 10, limit: 50 });
    assert_eq!(PageWindow::default(), PageWindow { offset: 0, limit: 200 });
}

#[test]
fn test_page_window_advance_and_query() {
    let window = PageWindow::new(40, 20).advance(3);
    assert_eq!(window, PageWindow { offset: 43, limit: 20 });
    assert_eq!(
        window.to_query(),
        vec![
            ("limit".to_string(), "20".to_string()),
            ("offset".to_string(), "43".to_string())
        ]
    );
}

#[test]
fn test_page_deserializes_search_body() {
    let page: Page<serde_json::Value> =
        serde_json::from_value(serde_json::json!({"rows": [{"id": "a"}], "total": 7})).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.total, 7);

    let page: Page<serde_json::Value> = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(page.is_empty());
}

// ============================================================================
// SearchCursor Tests
// ============================================================================

#[test]
fn test_cursor_steps() {
    let mut cursor: SearchCursor<u64> = SearchCursor::new(SearchFilters::new(), 2, 5);
    assert_eq!(cursor.step(), Step::Fetch(PageWindow::new(5, 2)));

    cursor.accept(Page::new(vec![5, 6], 10));
    assert_eq!(cursor.position(), 5);
    assert_eq!(cursor.step(), Step::Yield(5));
    assert_eq!(cursor.position(), 6);
    assert_eq!(cursor.step(), Step::Yield(6));
    assert_eq!(cursor.step(), Step::Fetch(PageWindow::new(7, 2)));

    cursor.accept(Page::empty());
    assert_eq!(cursor.step(), Step::Done);
    assert!(cursor.is_done());
    assert_eq!(cursor.pages_fetched(), 2);
    assert_eq!(cursor.last_total(), Some(0));
}

#[test]
fn test_cursor_fail_ends_sequence() {
    let mut cursor: SearchCursor<u64> = SearchCursor::new(SearchFilters::new(), 10, 0);
    cursor.fail();
    assert_eq!(cursor.step(), Step::Done);
}

// ============================================================================
// Blocking Iterator Tests
// ============================================================================

#[test]
fn test_iterate_yields_every_record_then_stops() {
    let mut calls = Vec::new();
    let records: Vec<u64> = iterate(SearchFilters::new(), 10, 0, |_, window| {
        calls.push(window);
        Ok(serve(25, window))
    })
    .collect::<Result<_>>()
    .unwrap();

    assert_eq!(records, (0..25).collect::<Vec<_>>());
    // Three full or partial pages plus the terminating empty one
    assert_eq!(calls.len(), 4);
}

#[test]
fn test_iterate_offsets_advance_by_records_returned() {
    let sizes = [4usize, 2, 3, 0];
    let mut script = sizes.iter();
    let mut calls = Vec::new();

    let count = iterate(SearchFilters::new(), 5, 0, |_, window| {
        calls.push(window.offset);
        let n = *script.next().unwrap();
        Ok(Page::new(vec![0u64; n], 100))
    })
    .count();

    assert_eq!(count, 9);
    assert_eq!(calls, vec![0, 4, 6, 9]);
}

#[test]
fn test_iterate_clamps_limit() {
    let mut limits = Vec::new();
    let count = iterate(SearchFilters::new(), 500, 0, |_, window| {
        limits.push(window.limit);
        Ok(serve(450, window))
    })
    .count();

    assert_eq!(count, 450);
    assert!(limits.iter().all(|&l| l <= 200));
}

#[test]
fn test_iterate_continues_after_short_page() {
    let mut calls = Vec::new();
    let records: Vec<u64> = iterate(SearchFilters::new(), 10, 0, |_, window| {
        calls.push(window.offset);
        Ok(match calls.len() {
            1 => Page::new(vec![1, 2, 3], 6),
            2 => Page::new(vec![4, 5, 6], 6),
            _ => Page::empty(),
        })
    })
    .map(Result::unwrap)
    .collect();

    assert_eq!(records, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(calls, vec![0, 3, 6]);
}

#[test]
fn test_iterate_empty_first_page() {
    let mut calls = 0;
    let mut iter = iterate(SearchFilters::new(), 10, 0, |_, _| {
        calls += 1;
        Ok(Page::<u64>::new(Vec::new(), 42))
    });

    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    drop(iter);
    assert_eq!(calls, 1);
}

#[test]
fn test_iterate_is_lazy() {
    let mut calls = 0;
    let iter = iterate(SearchFilters::new(), 10, 0, |_, window| {
        calls += 1;
        Ok(serve(100, window))
    });
    let first_three: Vec<u64> = iter.take(3).map(Result::unwrap).collect();

    assert_eq!(first_three, vec![0, 1, 2]);
    assert_eq!(calls, 1);
}

#[test]
fn test_iterate_propagates_failure_after_yielded_records() {
    let mut calls = 0;
    let mut iter = iterate(SearchFilters::new(), 3, 0, |_, _| {
        calls += 1;
        if calls == 1 {
            Ok(Page::new(vec![1u64, 2, 3], 10))
        } else {
            Err(Error::from_status(502, "bad gateway"))
        }
    });

    assert_eq!(iter.next().unwrap().unwrap(), 1);
    assert_eq!(iter.next().unwrap().unwrap(), 2);
    assert_eq!(iter.next().unwrap().unwrap(), 3);

    let err = iter.next().unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(iter.cursor().position(), 3);
    assert!(iter.next().is_none());
}

#[test]
fn test_iterate_resumes_from_offset() {
    let mut first_offset = None;
    let first: Vec<u64> = iterate(SearchFilters::new(), 10, 50, |_, window| {
        first_offset.get_or_insert(window.offset);
        Ok(serve(55, window))
    })
    .map(Result::unwrap)
    .collect();

    assert_eq!(first_offset, Some(50));
    assert_eq!(first, vec![50, 51, 52, 53, 54]);
}

#[test]
fn test_iterate_offset_past_end_is_empty() {
    let mut iter = iterate(SearchFilters::new(), 10, 1_000, |_, window| Ok(serve(5, window)));
    assert!(iter.next().is_none());
}

#[test]
fn test_iterate_does_not_deduplicate() {
    let mut calls = 0;
    let records: Vec<u64> = iterate(SearchFilters::new(), 2, 0, |_, _| {
        calls += 1;
        Ok(match calls {
            1 => Page::new(vec![1, 2], 3),
            2 => Page::new(vec![2, 3], 3),
            _ => Page::empty(),
        })
    })
    .map(Result::unwrap)
    .collect();

    assert_eq!(records, vec![1, 2, 2, 3]);
}

#[test]
fn test_iterate_ignores_stale_total() {
    // Total says 2 but a third record exists
    let mut calls = 0;
    let records: Vec<u64> = iterate(SearchFilters::new(), 2, 0, |_, _| {
        calls += 1;
        Ok(match calls {
            1 => Page::new(vec![1, 2], 2),
            2 => Page::new(vec![3], 2),
            _ => Page::empty(),
        })
    })
    .map(Result::unwrap)
    .collect();

    assert_eq!(records, vec![1, 2, 3]);
}

#[test]
fn test_iterate_passes_filters_unchanged() {
    let filters = SearchFilters::new().tag("rust").group("g1");
    let expected = filters.clone();
    let mut seen = Vec::new();

    let _ = iterate(filters, 1, 0, |f, window| {
        seen.push(f.clone());
        Ok(serve(2, window))
    })
    .count();

    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|f| *f == expected));
}

// ============================================================================
// Async Stream Tests
// ============================================================================

#[tokio::test]
async fn test_paginate_yields_all_pages() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::new(vec![1, 2], 5)),
        Ok(Page::new(vec![3, 4], 5)),
        Ok(Page::new(vec![5], 5)),
    ]);

    let records: Vec<u64> = paginate(&fetcher, SearchFilters::new(), 2, 0)
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(records, vec![1, 2, 3, 4, 5]);
    let offsets: Vec<u64> = fetcher.calls().iter().map(|w| w.offset).collect();
    assert_eq!(offsets, vec![0, 2, 4, 5]);
}

#[tokio::test]
async fn test_paginate_clamps_and_resumes() {
    let fetcher = ScriptedFetcher::new(vec![Ok(Page::new(vec![9], 1))]);

    let count = paginate(&fetcher, SearchFilters::new(), 1_000, 50)
        .count()
        .await;

    assert_eq!(count, 1);
    let calls = fetcher.calls();
    assert_eq!(calls[0], PageWindow { offset: 50, limit: 200 });
    assert_eq!(calls[1], PageWindow { offset: 51, limit: 200 });
}

#[tokio::test]
async fn test_paginate_failure_then_end() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::new(vec![1, 2, 3], 10)),
        Err(Error::from_status(401, "")),
        Ok(Page::new(vec![4], 10)),
    ]);

    let items: Vec<Result<u64>> = paginate(&fetcher, SearchFilters::new(), 3, 0)
        .collect()
        .await;

    assert_eq!(items.len(), 4);
    assert!(items[..3].iter().all(Result::is_ok));
    assert_eq!(
        items[3].as_ref().unwrap_err().kind(),
        ErrorKind::Authentication
    );
    assert_eq!(fetcher.calls().len(), 2);
}

#[tokio::test]
async fn test_paginate_dropped_stream_stops_fetching() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::new(vec![1, 2], 4)),
        Ok(Page::new(vec![3, 4], 4)),
    ]);

    {
        let mut stream = paginate(&fetcher, SearchFilters::new(), 2, 0);
        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
    }

    assert_eq!(fetcher.calls().len(), 1);
}
