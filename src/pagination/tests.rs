//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Serves pre-scripted pages and records every requested cursor
#[derive(Clone, Default)]
struct Scripted {
    pages: Arc<Mutex<VecDeque<Result<Page<u64>>>>>,
    requested: Arc<Mutex<Vec<u64>>>,
    fixed_cursor: Option<u64>,
}

impl Scripted {
    fn new(pages: Vec<Result<Page<u64>>>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages.into())),
            ..Default::default()
        }
    }

    fn with_fixed_cursor(mut self, cursor: u64) -> Self {
        self.fixed_cursor = Some(cursor);
        self
    }

    fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalkStrategy for Scripted {
    type Cursor = u64;
    type Item = u64;

    async fn fetch_page(&self, cursor: &u64) -> Result<Page<u64>> {
        self.requested.lock().unwrap().push(*cursor);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::new(Vec::new(), false, true)))
    }

    fn next_cursor(&self, page: &Page<u64>) -> Option<u64> {
        self.fixed_cursor.or_else(|| page.items.last().copied())
    }

    fn should_continue(&self, page: &Page<u64>) -> bool {
        !page.at_end
    }
}

fn page(items: &[u64], at_end: bool) -> Result<Page<u64>> {
    Ok(Page::new(items.to_vec(), false, at_end))
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_from_items_response() {
    let res: crate::responses::GetItemsResponse = serde_json::from_value(serde_json::json!({
        "atStart": true,
        "atEnd": false,
        "items": [{"id": 9}, {"id": 8}]
    }))
    .unwrap();

    let page: Page<crate::types::Item> = res.into();
    assert!(page.at_start);
    assert!(!page.at_end);
    assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![9, 8]);
}

// ============================================================================
// Walker Tests
// ============================================================================

#[tokio::test]
async fn test_walk_two_pages_until_at_end() {
    let strategy = Scripted::new(vec![page(&[100, 99, 98], false), page(&[98, 97], true)]);

    let items: Vec<u64> = walk(strategy.clone(), 100).try_collect().await.unwrap();

    // The boundary item 98 is yielded by both pages
    assert_eq!(items, vec![100, 99, 98, 98, 97]);
    assert_eq!(strategy.requested(), vec![100, 98]);
}

#[tokio::test]
async fn test_walk_empty_first_page() {
    let strategy = Scripted::new(vec![page(&[], false)]);

    let items: Vec<u64> = walk(strategy.clone(), 5).try_collect().await.unwrap();

    assert!(items.is_empty());
    assert_eq!(strategy.requested(), vec![5]);
}

#[tokio::test]
async fn test_walk_stall_guard() {
    let strategy = Scripted::new(vec![
        page(&[5, 4, 3], false),
        page(&[3, 2, 1], false),
    ])
    .with_fixed_cursor(5);

    let items: Vec<u64> = walk(strategy.clone(), 5).try_collect().await.unwrap();

    assert_eq!(items, vec![5, 4, 3]);
    assert_eq!(strategy.requested(), vec![5]);
}

#[tokio::test]
async fn test_walk_stops_on_empty_page_mid_walk() {
    let strategy = Scripted::new(vec![
        page(&[10, 9], false),
        page(&[9, 8], false),
        page(&[], false),
        page(&[7], false),
    ]);

    let items: Vec<u64> = walk(strategy.clone(), 10).try_collect().await.unwrap();

    assert_eq!(items, vec![10, 9, 9, 8]);
    assert_eq!(strategy.requested(), vec![10, 9, 8]);
}

#[tokio::test]
async fn test_walk_requests_one_page_per_progress() {
    let strategy = Scripted::new(vec![
        page(&[30, 29], false),
        page(&[28, 27], false),
        page(&[26], false),
        page(&[25], true),
    ]);

    let items: Vec<u64> = walk(strategy.clone(), 31).try_collect().await.unwrap();

    assert_eq!(items, vec![30, 29, 28, 27, 26, 25]);
    assert_eq!(strategy.requested(), vec![31, 29, 27, 26]);
}

#[tokio::test]
async fn test_walk_error_ends_stream() {
    let strategy = Scripted::new(vec![
        page(&[3, 2], false),
        Err(Error::http_status(502, "bad gateway")),
        page(&[1], false),
    ]);

    let mut stream = walk(strategy.clone(), 3);

    assert_eq!(stream.next().await.unwrap().unwrap(), 3);
    assert_eq!(stream.next().await.unwrap().unwrap(), 2);
    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
    assert!(stream.next().await.is_none());

    assert_eq!(strategy.requested(), vec![3, 2]);
}

#[tokio::test]
async fn test_walk_is_lazy() {
    let strategy = Scripted::new(vec![page(&[3, 2, 1], false), page(&[1, 0], false)]);

    let stream = walk(strategy.clone(), 3);
    assert!(strategy.requested().is_empty());

    let first_two: Vec<u64> = stream.take(2).try_collect().await.unwrap();

    assert_eq!(first_two, vec![3, 2]);
    assert_eq!(strategy.requested(), vec![3]);
}

#[tokio::test]
async fn test_walk_no_next_cursor() {
    struct NoCursor;

    #[async_trait]
    impl WalkStrategy for NoCursor {
        type Cursor = u64;
        type Item = &'static str;

        async fn fetch_page(&self, _cursor: &u64) -> Result<Page<&'static str>> {
            Ok(Page::new(vec!["a", "b"], false, false))
        }

        fn next_cursor(&self, _page: &Page<&'static str>) -> Option<u64> {
            None
        }

        fn should_continue(&self, _page: &Page<&'static str>) -> bool {
            true
        }
    }

    let items: Vec<&str> = walk(NoCursor, 1).try_collect().await.unwrap();
    assert_eq!(items, vec!["a", "b"]);
}
