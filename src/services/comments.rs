//! `/comments` endpoints

use super::post;
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::responses::Pr0grammResponse;
use crate::types::{CommentId, ItemId, Vote};
use std::sync::Arc;

#[derive(Clone)]
pub struct CommentsService {
    transport: Arc<dyn Transport>,
}

impl CommentsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn delete(&self, id: CommentId, reason: &str) -> Result<Pr0grammResponse> {
        let body = Params::new().with("id", id).with("reason", reason);
        post(&*self.transport, "/comments/delete", body).await
    }

    /// Hide a comment while keeping its replies
    pub async fn soft_delete(&self, id: CommentId, reason: &str) -> Result<Pr0grammResponse> {
        let body = Params::new().with("id", id).with("reason", reason);
        post(&*self.transport, "/comments/softDelete", body).await
    }

    pub async fn edit(&self, id: CommentId, content: &str) -> Result<Pr0grammResponse> {
        let body = Params::new().with("commentId", id).with("comment", content);
        post(&*self.transport, "/comments/edit", body).await
    }

    pub async fn vote(&self, id: CommentId, vote: Vote) -> Result<Pr0grammResponse> {
        let body = Params::new().with("id", id).with("vote", vote.as_i8());
        post(&*self.transport, "/comments/vote", body).await
    }

    /// Post a comment; `reply_to` of `None` posts at top level (parent 0)
    pub async fn post(
        &self,
        item_id: ItemId,
        content: &str,
        reply_to: Option<CommentId>,
    ) -> Result<Pr0grammResponse> {
        let body = Params::new()
            .with("comment", content)
            .with("itemId", item_id)
            .with("parentId", reply_to.unwrap_or(0));
        post(&*self.transport, "/comments/post", body).await
    }
}
