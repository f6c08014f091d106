use crate::{APIResponse, BaseClient};
use gather_notifier_api_structs::{deliver_notification, get_subscriber_hash, identify_subscriber};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub type DeliverNotificationInput = deliver_notification::RequestBody;
pub type IdentifySubscriberInput = identify_subscriber::RequestBody;

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn deliver(
        &self,
        input: DeliverNotificationInput,
    ) -> APIResponse<deliver_notification::APIResponse> {
        self.base
            .post(input, "notifications".into(), StatusCode::ACCEPTED)
            .await
    }

    /// Credentials of the signed in user for the in-app inbox
    pub async fn get_subscriber_hash(&self) -> APIResponse<get_subscriber_hash::APIResponse> {
        self.base
            .get("notifications/subscriber".into(), StatusCode::OK)
            .await
    }

    pub async fn identify_subscriber(
        &self,
        input: IdentifySubscriberInput,
    ) -> APIResponse<identify_subscriber::APIResponse> {
        self.base
            .post(input, "subscribers".into(), StatusCode::OK)
            .await
    }
}
