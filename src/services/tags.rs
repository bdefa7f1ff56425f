//! `/tags` endpoints

use super::{get, post};
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::responses::{GetDetailsResponse, Pr0grammResponse};
use crate::types::{create_tag_list, BanDuration, ItemId, TagId, Vote};
use std::sync::Arc;

#[derive(Clone)]
pub struct TagsService {
    transport: Arc<dyn Transport>,
}

impl TagsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Attach tags to an item
    pub async fn add<S: AsRef<str>>(&self, item_id: ItemId, tags: &[S]) -> Result<Pr0grammResponse> {
        let body = Params::new()
            .with("itemId", item_id)
            .with("tags", create_tag_list(tags))
            .with("submit", "Tags speichern");
        post(&*self.transport, "/tags/add", body).await
    }

    /// Remove tags from an item, optionally banning the users who added them
    pub async fn delete<S: AsRef<str>>(
        &self,
        item_id: ItemId,
        ban_users: bool,
        days: BanDuration,
        tags: &[S],
    ) -> Result<Pr0grammResponse> {
        let body = Params::new()
            .with("itemId", item_id)
            .with("tags", create_tag_list(tags))
            .with("banUsers", ban_users)
            .with("days", days);
        post(&*self.transport, "/tags/delete", body).await
    }

    /// Tags of an item with confidence and votes
    pub async fn get_details(&self, item_id: ItemId) -> Result<GetDetailsResponse> {
        let query = Params::new().with("itemId", item_id);
        get(&*self.transport, "/tags/details", query).await
    }

    pub async fn vote(&self, id: TagId, vote: Vote) -> Result<Pr0grammResponse> {
        let body = Params::new().with("id", id).with("vote", vote.as_i8());
        post(&*self.transport, "/tags/vote", body).await
    }
}
