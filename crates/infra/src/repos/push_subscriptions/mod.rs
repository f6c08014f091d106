mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use gather_notifier_domain::{PushSubscription, ID};
pub use inmemory::InMemoryPushSubscriptionRepo;
pub use postgres::PostgresPushSubscriptionRepo;

#[async_trait::async_trait]
pub trait IPushSubscriptionRepo: Send + Sync {
    /// Stores the subscription, or updates the keys of the subscription the
    /// user already has for the same endpoint. Returns what is stored.
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<PushSubscription>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>>;
    async fn delete_by_endpoint(&self, user_id: &ID, endpoint: &str)
        -> anyhow::Result<DeleteResult>;
    /// Deleting ids that are already gone is not an error
    async fn delete_many(&self, subscription_ids: &[ID]) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GatherContext;

    fn subscription(user_id: ID, endpoint: &str, p256dh: &str) -> PushSubscription {
        PushSubscription::new(user_id, endpoint.into(), p256dh.into(), "auth".into())
    }

    #[tokio::test]
    async fn upsert_is_idempotent_per_endpoint() {
        let ctx = GatherContext::create_inmemory();
        let user_id = ID::default();

        let first = ctx
            .repos
            .push_subscriptions
            .upsert(&subscription(user_id, "https://push.test/1", "key-a"))
            .await
            .expect("To upsert subscription");
        let second = ctx
            .repos
            .push_subscriptions
            .upsert(&subscription(user_id, "https://push.test/1", "key-b"))
            .await
            .expect("To upsert subscription");
        assert_eq!(first.id, second.id);
        assert_eq!(second.p256dh, "key-b");

        let stored = ctx
            .repos
            .push_subscriptions
            .find_by_user(&user_id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].p256dh, "key-b");
    }

    #[tokio::test]
    async fn same_endpoint_for_different_users_is_kept_apart() {
        let ctx = GatherContext::create_inmemory();
        let user_1 = ID::default();
        let user_2 = ID::default();
        for user_id in [user_1, user_2] {
            ctx.repos
                .push_subscriptions
                .upsert(&subscription(user_id, "https://push.test/1", "key"))
                .await
                .unwrap();
        }

        let res = ctx
            .repos
            .push_subscriptions
            .delete_by_endpoint(&user_1, "https://push.test/1")
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(ctx
            .repos
            .push_subscriptions
            .find_by_user(&user_1)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            ctx.repos
                .push_subscriptions
                .find_by_user(&user_2)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn delete_many_ignores_missing_ids() {
        let ctx = GatherContext::create_inmemory();
        let user_id = ID::default();
        let stored = ctx
            .repos
            .push_subscriptions
            .upsert(&subscription(user_id, "https://push.test/1", "key"))
            .await
            .unwrap();

        let res = ctx
            .repos
            .push_subscriptions
            .delete_many(&[stored.id, ID::default()])
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 1);
        let res = ctx
            .repos
            .push_subscriptions
            .delete_many(&[stored.id])
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 0);
    }
}
