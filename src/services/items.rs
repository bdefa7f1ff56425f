//! `/items` endpoints and stream walking

use super::{get, post};
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::pagination::{walk, NewerItems, OlderItems, WalkStream};
use crate::responses::{GetItemsInfoResponse, GetItemsResponse, Pr0grammResponse};
use crate::types::{create_tag_list, BanDuration, DeleteItemReason, Item, ItemFlags, ItemId, Vote};
use std::sync::Arc;
use tracing::debug;

/// Filters for `/items/get`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetItemsOptions {
    pub flags: ItemFlags,
    pub promoted: bool,
    /// Only the caller's own uploads
    pub self_only: bool,
    pub tags: Option<Vec<String>>,
    pub user: Option<String>,
    pub likes: Option<String>,
    pub collection: Option<String>,
}

impl GetItemsOptions {
    /// Options with the given content flags
    pub fn new(flags: ItemFlags) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn promoted(mut self, promoted: bool) -> Self {
        self.promoted = promoted;
        self
    }

    #[must_use]
    pub fn self_only(mut self, self_only: bool) -> Self {
        self.self_only = self_only;
        self
    }

    #[must_use]
    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn likes(mut self, likes: impl Into<String>) -> Self {
        self.likes = Some(likes.into());
        self
    }

    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Encode as query parameters; absent filters are omitted
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("flags", self.flags)
            .with_flag("promoted", self.promoted)
            .with_flag("self", self.self_only)
            .with_opt("tags", self.tags.as_deref().map(create_tag_list))
            .with_opt("user", self.user.as_deref())
            .with_opt("likes", self.likes.as_deref())
            .with_opt("collection", self.collection.as_deref())
    }
}

/// Moderation request for `/items/delete`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteItemOptions {
    pub item_id: ItemId,
    pub days: BanDuration,
    pub ban_user: bool,
    pub notify_user: bool,
    pub reason: DeleteItemReason,
    pub custom_reason: String,
}

impl DeleteItemOptions {
    fn to_params(&self) -> Params {
        Params::new()
            .with("itemId", self.item_id)
            .with("days", self.days)
            .with("banUser", self.ban_user)
            .with("notifyUser", self.notify_user)
            .with("reason", self.reason)
            .with("customReason", &self.custom_reason)
    }
}

/// Item stream, voting and moderation
#[derive(Clone)]
pub struct ItemsService {
    transport: Arc<dyn Transport>,
}

impl ItemsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn delete(&self, options: &DeleteItemOptions) -> Result<Pr0grammResponse> {
        post(&*self.transport, "/items/delete", options.to_params()).await
    }

    /// Tags and comments of one item
    pub async fn get_info(&self, item_id: ItemId) -> Result<GetItemsInfoResponse> {
        let query = Params::new().with("itemId", item_id);
        get(&*self.transport, "/items/info", query).await
    }

    /// The newest page matching `options`
    pub async fn get_items(&self, options: &GetItemsOptions) -> Result<GetItemsResponse> {
        get(&*self.transport, "/items/get", options.to_params()).await
    }

    /// The page of items newer than `newer`
    pub async fn get_items_newer(
        &self,
        newer: ItemId,
        options: &GetItemsOptions,
    ) -> Result<GetItemsResponse> {
        self.get_items_from("newer", newer, options).await
    }

    /// The page of items older than `older`
    pub async fn get_items_older(
        &self,
        older: ItemId,
        options: &GetItemsOptions,
    ) -> Result<GetItemsResponse> {
        self.get_items_from("older", older, options).await
    }

    /// The page centered on `around`
    pub async fn get_items_around(
        &self,
        around: ItemId,
        options: &GetItemsOptions,
    ) -> Result<GetItemsResponse> {
        self.get_items_from("id", around, options).await
    }

    async fn get_items_from(
        &self,
        key: &str,
        id: ItemId,
        options: &GetItemsOptions,
    ) -> Result<GetItemsResponse> {
        let mut query = Params::new().with(key, id);
        query.extend(options.to_params());
        debug!(key, id, "Fetching items");
        get(&*self.transport, "/items/get", query).await
    }

    /// Stream every item from `newer` towards the newest one
    pub fn walk_stream_newer(&self, newer: ItemId, options: GetItemsOptions) -> WalkStream<Item> {
        walk(NewerItems::new(self.clone(), options), newer)
    }

    /// Stream every item from `older` towards the oldest one
    pub fn walk_stream_older(&self, older: ItemId, options: GetItemsOptions) -> WalkStream<Item> {
        walk(OlderItems::new(self.clone(), options), older)
    }

    pub async fn vote(&self, id: ItemId, vote: Vote) -> Result<Pr0grammResponse> {
        let body = Params::new().with("id", id).with("vote", vote.as_i8());
        post(&*self.transport, "/items/vote", body).await
    }

    pub async fn rate_limited(&self) -> Result<Pr0grammResponse> {
        post(&*self.transport, "/items/ratelimited", Params::new()).await
    }
}
