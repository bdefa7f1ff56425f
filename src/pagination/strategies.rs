//! Walk directions over the item stream
//!
//! Both strategies use the id of a page's last item as the next cursor and
//! stop at the boundary flag of their direction.

use super::types::{Page, WalkStrategy};
use crate::error::Result;
use crate::services::{GetItemsOptions, ItemsService};
use crate::types::{Item, ItemId};
use async_trait::async_trait;

/// Walk towards older items (`?older=<id>`), until `at_end`
#[derive(Clone)]
pub struct OlderItems {
    items: ItemsService,
    options: GetItemsOptions,
}

impl OlderItems {
    pub fn new(items: ItemsService, options: GetItemsOptions) -> Self {
        Self { items, options }
    }
}

#[async_trait]
impl WalkStrategy for OlderItems {
    type Cursor = ItemId;
    type Item = Item;

    async fn fetch_page(&self, cursor: &ItemId) -> Result<Page<Item>> {
        let res = self.items.get_items_older(*cursor, &self.options).await?;
        Ok(res.into())
    }

    fn next_cursor(&self, page: &Page<Item>) -> Option<ItemId> {
        page.items.last().map(|item| item.id)
    }

    fn should_continue(&self, page: &Page<Item>) -> bool {
        !page.at_end
    }
}

/// Walk towards newer items (`?newer=<id>`), until `at_start`
#[derive(Clone)]
pub struct NewerItems {
    items: ItemsService,
    options: GetItemsOptions,
}

impl NewerItems {
    pub fn new(items: ItemsService, options: GetItemsOptions) -> Self {
        Self { items, options }
    }
}

#[async_trait]
impl WalkStrategy for NewerItems {
    type Cursor = ItemId;
    type Item = Item;

    async fn fetch_page(&self, cursor: &ItemId) -> Result<Page<Item>> {
        let res = self.items.get_items_newer(*cursor, &self.options).await?;
        Ok(res.into())
    }

    fn next_cursor(&self, page: &Page<Item>) -> Option<ItemId> {
        page.items.last().map(|item| item.id)
    }

    fn should_continue(&self, page: &Page<Item>) -> bool {
        !page.at_start
    }
}
