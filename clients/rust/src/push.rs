use crate::{APIResponse, BaseClient};
use gather_notifier_api_structs::{subscribe_push, unsubscribe_push};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct PushClient {
    base: Arc<BaseClient>,
}

pub struct SubscribePushInput {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

impl PushClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn subscribe(
        &self,
        input: SubscribePushInput,
    ) -> APIResponse<subscribe_push::APIResponse> {
        let body = subscribe_push::RequestBody {
            endpoint: input.endpoint,
            keys: subscribe_push::PushKeys {
                p256dh: input.p256dh,
                auth: input.auth,
            },
        };
        self.base
            .post(body, "push/subscribe".into(), StatusCode::CREATED)
            .await
    }

    pub async fn unsubscribe(&self, endpoint: String) -> APIResponse<unsubscribe_push::APIResponse> {
        let body = unsubscribe_push::RequestBody { endpoint };
        self.base
            .delete_with_body(body, "push/subscribe".into(), StatusCode::OK)
            .await
    }
}
