use super::IPushSubscriptionRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use gather_notifier_domain::{PushSubscription, ID};

pub struct InMemoryPushSubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<PushSubscription>>,
}

impl InMemoryPushSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for InMemoryPushSubscriptionRepo {
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<PushSubscription> {
        Ok(upsert_by(
            subscription,
            &self.subscriptions,
            |s| s.user_id == subscription.user_id && s.endpoint == subscription.endpoint,
            |s| {
                s.p256dh = subscription.p256dh.clone();
                s.auth = subscription.auth.clone();
            },
        ))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
        Ok(find_by(&self.subscriptions, |s| s.user_id == *user_id))
    }

    async fn delete_by_endpoint(
        &self,
        user_id: &ID,
        endpoint: &str,
    ) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.subscriptions, |s| {
            s.user_id == *user_id && s.endpoint == endpoint
        }))
    }

    async fn delete_many(&self, subscription_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.subscriptions, |s| {
            subscription_ids.contains(&s.id)
        }))
    }
}
