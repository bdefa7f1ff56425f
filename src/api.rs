//! Entry point bundling every service over one transport

use crate::http::Transport;
use crate::services::{
    CommentsService, ContactService, ItemsService, MessagesService, ProfileService, TagsService,
    UserService,
};
use std::sync::Arc;

/// All endpoint groups, sharing one transport
///
/// Services can also be created on their own when only one area is needed.
#[derive(Clone)]
pub struct Pr0grammApi {
    pub items: ItemsService,
    pub tags: TagsService,
    pub messages: MessagesService,
    pub comments: CommentsService,
    pub profile: ProfileService,
    pub contact: ContactService,
    pub user: UserService,
    transport: Arc<dyn Transport>,
}

impl Pr0grammApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            items: ItemsService::new(transport.clone()),
            tags: TagsService::new(transport.clone()),
            messages: MessagesService::new(transport.clone()),
            comments: CommentsService::new(transport.clone()),
            profile: ProfileService::new(transport.clone()),
            contact: ContactService::new(transport.clone()),
            user: UserService::new(transport.clone()),
            transport,
        }
    }

    /// The shared transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}
