//! `/contact` endpoint

use super::post;
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::responses::Pr0grammResponse;
use std::sync::Arc;

#[derive(Clone)]
pub struct ContactService {
    transport: Arc<dyn Transport>,
}

impl ContactService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a message to the site operators
    pub async fn send(&self, email: &str, subject: &str, message: &str) -> Result<Pr0grammResponse> {
        let body = Params::new()
            .with("email", email)
            .with("subject", subject)
            .with("message", message);
        post(&*self.transport, "/contact/send", body).await
    }
}
