use crate::{APIResponse, BaseClient};
use gather_notifier_api_structs::rsvp_created;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct RsvpClient {
    base: Arc<BaseClient>,
}

pub type RsvpCreatedInput = rsvp_created::RequestBody;

impl RsvpClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn created(&self, input: RsvpCreatedInput) -> APIResponse<rsvp_created::APIResponse> {
        self.base
            .post(input, "rsvps".into(), StatusCode::ACCEPTED)
            .await
    }
}
