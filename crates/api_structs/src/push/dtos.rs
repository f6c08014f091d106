use gather_notifier_domain::{PushSubscription, ID};
use serde::{Deserialize, Serialize};

/// A push subscription as shown to its owner. The keys are never echoed back.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionDTO {
    pub id: ID,
    pub user_id: ID,
    pub endpoint: String,
}

impl PushSubscriptionDTO {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            endpoint: subscription.endpoint,
        }
    }
}
