//! Pagination types and traits
//!
//! Defines the page shape and the strategy trait all walk directions use.

use crate::error::Result;
use crate::responses::GetItemsResponse;
use crate::types::Item;
use async_trait::async_trait;
use std::fmt::Debug;

/// One server response: an ordered batch plus boundary flags
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in the server's order
    pub items: Vec<T>,
    /// The page touches the newest end of the collection
    pub at_start: bool,
    /// The page touches the oldest end of the collection
    pub at_end: bool,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, at_start: bool, at_end: bool) -> Self {
        Self {
            items,
            at_start,
            at_end,
        }
    }

    /// Check if the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<GetItemsResponse> for Page<Item> {
    fn from(res: GetItemsResponse) -> Self {
        Self::new(res.items, res.at_start, res.at_end)
    }
}

/// Direction-specific half of a walk
#[async_trait]
pub trait WalkStrategy: Send + Sync {
    /// Ordering identifier used to request pages
    type Cursor: Clone + PartialEq + Debug + Send + Sync;
    /// Record yielded by the walk
    type Item: Send;

    /// Fetch the page for a cursor
    async fn fetch_page(&self, cursor: &Self::Cursor) -> Result<Page<Self::Item>>;

    /// Cursor for the page after `page`; only called for non-empty pages
    ///
    /// `None` ends the walk.
    fn next_cursor(&self, page: &Page<Self::Item>) -> Option<Self::Cursor>;

    /// Whether another page should be requested after `page`
    fn should_continue(&self, page: &Page<Self::Item>) -> bool;
}
