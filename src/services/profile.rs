//! `/profile` endpoints

use super::{get, post};
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::responses::{GetCommentsResponse, GetProfileInfoResponse, Pr0grammResponse};
use crate::types::{ItemFlags, Timestamp};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileService {
    transport: Arc<dyn Transport>,
}

impl ProfileService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Comments of `name` written before `before`
    pub async fn get_comments_before(
        &self,
        name: &str,
        flags: ItemFlags,
        before: impl Into<Timestamp>,
    ) -> Result<GetCommentsResponse> {
        let query = Params::new()
            .with("name", name)
            .with("flags", flags)
            .with("before", before.into().unix_seconds());
        get(&*self.transport, "/profile/comments", query).await
    }

    /// Comments of `name` written after `after`
    pub async fn get_comments_after(
        &self,
        name: &str,
        flags: ItemFlags,
        after: impl Into<Timestamp>,
    ) -> Result<GetCommentsResponse> {
        let query = Params::new()
            .with("name", name)
            .with("flags", flags)
            .with("after", after.into().unix_seconds());
        get(&*self.transport, "/profile/comments", query).await
    }

    pub async fn follow(&self, name: &str) -> Result<Pr0grammResponse> {
        post(&*self.transport, "/profile/follow", Params::new().with("name", name)).await
    }

    pub async fn unfollow(&self, name: &str) -> Result<Pr0grammResponse> {
        post(&*self.transport, "/profile/unfollow", Params::new().with("name", name)).await
    }

    pub async fn get_info(&self, name: &str, flags: ItemFlags) -> Result<GetProfileInfoResponse> {
        let query = Params::new().with("name", name).with("flags", flags);
        get(&*self.transport, "/profile/info", query).await
    }
}
