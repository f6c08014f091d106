use futures::future::join_all;
use gather_notifier_domain::{PushMessage, ID};
use gather_notifier_infra::GatherContext;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushDeliveryResult {
    pub sent: usize,
    pub failed: usize,
}

/// Delivers `message` to every device the user has subscribed with.
///
/// Devices are delivered to concurrently. Subscriptions the push service
/// reports as gone are deleted once every attempt has finished, other
/// failures are only counted. Never fails, a user without subscriptions
/// simply gets nothing.
#[tracing::instrument(name = "Send push to user", skip(ctx, message), fields(tag = ?message.tag))]
pub async fn send_push_to_user(
    ctx: &GatherContext,
    user_id: &ID,
    message: PushMessage,
) -> PushDeliveryResult {
    let subscriptions = match ctx.repos.push_subscriptions.find_by_user(user_id).await {
        Ok(subscriptions) => subscriptions,
        Err(e) => {
            error!(
                "Unable to load push subscriptions of user: {}. Error: {:?}",
                user_id, e
            );
            return PushDeliveryResult::default();
        }
    };
    if subscriptions.is_empty() {
        return PushDeliveryResult::default();
    }

    let message = message.with_defaults();
    let attempts = subscriptions
        .iter()
        .map(|subscription| ctx.services.push.send(subscription, &message))
        .collect::<Vec<_>>();
    let results = join_all(attempts).await;

    let mut result = PushDeliveryResult::default();
    let mut expired = Vec::new();
    for (subscription, res) in subscriptions.iter().zip(results) {
        match res {
            Ok(()) => result.sent += 1,
            Err(e) => {
                result.failed += 1;
                if e.is_subscription_expired() {
                    info!(
                        "Push subscription: {} of user: {} has expired",
                        subscription.id, user_id
                    );
                    expired.push(subscription.id);
                } else {
                    warn!(
                        "Push to subscription: {} of user: {} failed. Error: {}",
                        subscription.id, user_id, e
                    );
                }
            }
        }
    }

    if !expired.is_empty() {
        if let Err(e) = ctx.repos.push_subscriptions.delete_many(&expired).await {
            error!(
                "Unable to delete expired push subscriptions: {:?}. Error: {:?}",
                expired, e
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_domain::PushSubscription;
    use gather_notifier_infra::PushBehavior;

    async fn subscribe(ctx: &GatherContext, user_id: ID, endpoint: &str) {
        ctx.repos
            .push_subscriptions
            .upsert(&PushSubscription::new(
                user_id,
                endpoint.into(),
                "p256dh".into(),
                "auth".into(),
            ))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn without_subscriptions_nothing_is_sent() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let res = send_push_to_user(&ctx, &ID::default(), PushMessage::new("Hi", "there")).await;
        assert_eq!(res, PushDeliveryResult { sent: 0, failed: 0 });
        assert!(handles.push.attempts().is_empty());
    }

    #[actix_web::test]
    async fn it_removes_expired_subscriptions() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let user_id = ID::default();
        for i in 0..4 {
            subscribe(&ctx, user_id, &format!("https://push.test/{}", i)).await;
        }
        handles
            .push
            .set_behavior("https://push.test/1", PushBehavior::Gone(410));
        handles
            .push
            .set_behavior("https://push.test/2", PushBehavior::Gone(404));

        let res = send_push_to_user(&ctx, &user_id, PushMessage::new("Hi", "there")).await;
        assert_eq!(res, PushDeliveryResult { sent: 2, failed: 2 });

        let remaining = ctx
            .repos
            .push_subscriptions
            .find_by_user(&user_id)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining
            .iter()
            .all(|s| s.endpoint == "https://push.test/0" || s.endpoint == "https://push.test/3"));

        let res = send_push_to_user(&ctx, &user_id, PushMessage::new("Hi", "again")).await;
        assert_eq!(res, PushDeliveryResult { sent: 2, failed: 0 });
    }

    #[actix_web::test]
    async fn transient_failures_keep_subscription() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let user_id = ID::default();
        subscribe(&ctx, user_id, "https://push.test/flaky").await;
        handles
            .push
            .set_behavior("https://push.test/flaky", PushBehavior::Fail(500));

        let res = send_push_to_user(&ctx, &user_id, PushMessage::new("Hi", "there")).await;
        assert_eq!(res, PushDeliveryResult { sent: 0, failed: 1 });
        assert_eq!(
            ctx.repos
                .push_subscriptions
                .find_by_user(&user_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[actix_web::test]
    async fn badge_count_defaults_to_one() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let user_id = ID::default();
        subscribe(&ctx, user_id, "https://push.test/0").await;

        send_push_to_user(&ctx, &user_id, PushMessage::new("Hi", "there")).await;
        let delivered = handles.push.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].1.badge_count, Some(1));
    }
}
