//! `/inbox` endpoints

use super::{get, post};
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::responses::{ConversationResponse, InboxCommentsResponse, MessagesResponse};
use crate::types::{ConversationId, Timestamp};
use std::sync::Arc;

/// Inbox, conversations and private messages
#[derive(Clone)]
pub struct MessagesService {
    transport: Arc<dyn Transport>,
}

impl MessagesService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_comments(&self) -> Result<InboxCommentsResponse> {
        get(&*self.transport, "/inbox/comments", Params::new()).await
    }

    pub async fn get_comments_older(&self, older: impl Into<Timestamp>) -> Result<InboxCommentsResponse> {
        let query = Params::new().with("older", older.into().unix_seconds());
        get(&*self.transport, "/inbox/comments", query).await
    }

    pub async fn get_conversations(&self) -> Result<ConversationResponse> {
        get(&*self.transport, "/inbox/conversations", Params::new()).await
    }

    pub async fn get_conversations_older(&self, older: ConversationId) -> Result<ConversationResponse> {
        let query = Params::new().with("older", older);
        get(&*self.transport, "/inbox/conversations", query).await
    }

    /// The conversation with `user`
    pub async fn get_messages(&self, user: &str) -> Result<MessagesResponse> {
        get(&*self.transport, "/inbox/messages", Params::new().with("with", user)).await
    }

    pub async fn send_message(&self, recipient: &str, comment: &str) -> Result<MessagesResponse> {
        let body = Params::new()
            .with("recipientName", recipient)
            .with("comment", comment);
        post(&*self.transport, "/inbox/post", body).await
    }
}
