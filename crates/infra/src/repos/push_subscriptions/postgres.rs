use super::IPushSubscriptionRepo;
use crate::repos::shared::repo::DeleteResult;
use gather_notifier_domain::{PushSubscription, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresPushSubscriptionRepo {
    pool: PgPool,
}

impl PostgresPushSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PushSubscriptionRaw {
    subscription_uid: Uuid,
    user_uid: Uuid,
    endpoint: String,
    p256dh: String,
    auth: String,
}

impl From<PushSubscriptionRaw> for PushSubscription {
    fn from(raw: PushSubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            user_id: raw.user_uid.into(),
            endpoint: raw.endpoint,
            p256dh: raw.p256dh,
            auth: raw.auth,
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for PostgresPushSubscriptionRepo {
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<PushSubscription> {
        let stored: PushSubscriptionRaw = sqlx::query_as(
            r#"
            INSERT INTO push_subscriptions(subscription_uid, user_uid, endpoint, p256dh, auth)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_uid, endpoint) DO UPDATE
            SET p256dh = EXCLUDED.p256dh,
            auth = EXCLUDED.auth,
            updated_at = now()
            RETURNING subscription_uid, user_uid, endpoint, p256dh, auth
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(subscription.user_id.inner_ref())
        .bind(&subscription.endpoint)
        .bind(&subscription.p256dh)
        .bind(&subscription.auth)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
        let subscriptions: Vec<PushSubscriptionRaw> = sqlx::query_as(
            r#"
            SELECT subscription_uid, user_uid, endpoint, p256dh, auth FROM push_subscriptions
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions.into_iter().map(|s| s.into()).collect())
    }

    async fn delete_by_endpoint(
        &self,
        user_id: &ID,
        endpoint: &str,
    ) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM push_subscriptions
            WHERE user_uid = $1 AND endpoint = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(endpoint)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_many(&self, subscription_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        let ids = subscription_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let res = sqlx::query(
            r#"
            DELETE FROM push_subscriptions
            WHERE subscription_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
