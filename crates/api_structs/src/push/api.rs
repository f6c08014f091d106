use crate::dtos::PushSubscriptionDTO;
use gather_notifier_domain::PushSubscription;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionResponse {
    pub subscription: PushSubscriptionDTO,
}

impl PushSubscriptionResponse {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            subscription: PushSubscriptionDTO::new(subscription),
        }
    }
}

pub mod subscribe_push {
    use super::*;

    /// Matches `PushSubscription.toJSON()` in the browser
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub endpoint: String,
        pub keys: PushKeys,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PushKeys {
        pub p256dh: String,
        pub auth: String,
    }

    pub type APIResponse = PushSubscriptionResponse;
}

pub mod unsubscribe_push {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub endpoint: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted: bool,
    }
}
