use super::{IInviteQuotaRepo, QuotaReservation};
use gather_notifier_domain::{InviteQuota, QuotaLimits, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresInviteQuotaRepo {
    pool: PgPool,
}

impl PostgresInviteQuotaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InviteQuotaRaw {
    user_uid: Uuid,
    daily_count: i32,
    daily_window_start: Option<i64>,
    weekly_count: i32,
    weekly_window_start: Option<i64>,
}

impl From<InviteQuotaRaw> for InviteQuota {
    fn from(raw: InviteQuotaRaw) -> Self {
        Self {
            user_id: raw.user_uid.into(),
            daily_count: raw.daily_count.max(0) as u32,
            daily_window_start: raw.daily_window_start,
            weekly_count: raw.weekly_count.max(0) as u32,
            weekly_window_start: raw.weekly_window_start,
        }
    }
}

impl PostgresInviteQuotaRepo {
    /// Applies `update` to the counters of the user while holding the row lock
    async fn update_locked<T, F>(&self, user_id: &ID, update: F) -> anyhow::Result<(T, InviteQuota)>
    where
        F: FnOnce(&mut InviteQuota) -> T + Send,
        T: Send,
    {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invite_quotas(user_uid)
            VALUES($1)
            ON CONFLICT (user_uid) DO NOTHING
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&mut *tx)
        .await?;

        // The row lock serializes concurrent updates for the same user
        let current: InviteQuotaRaw = sqlx::query_as(
            r#"
            SELECT * FROM invite_quotas
            WHERE user_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&mut *tx)
        .await?;

        let mut quota: InviteQuota = current.into();
        let res = update(&mut quota);

        sqlx::query(
            r#"
            UPDATE invite_quotas
            SET daily_count = $2,
            daily_window_start = $3,
            weekly_count = $4,
            weekly_window_start = $5
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(quota.daily_count as i32)
        .bind(quota.daily_window_start)
        .bind(quota.weekly_count as i32)
        .bind(quota.weekly_window_start)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((res, quota))
    }
}

#[async_trait::async_trait]
impl IInviteQuotaRepo for PostgresInviteQuotaRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<InviteQuota>> {
        let quota: Option<InviteQuotaRaw> = sqlx::query_as(
            r#"
            SELECT * FROM invite_quotas
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(quota.map(|q| q.into()))
    }

    async fn reserve(
        &self,
        user_id: &ID,
        requested: u32,
        limits: &QuotaLimits,
        now: i64,
    ) -> anyhow::Result<QuotaReservation> {
        let limits = *limits;
        let (check, quota) = self
            .update_locked(user_id, move |quota| quota.reserve(requested, &limits, now))
            .await?;
        Ok(QuotaReservation { check, quota })
    }

    async fn release(&self, user_id: &ID, count: u32, now: i64) -> anyhow::Result<InviteQuota> {
        let ((), quota) = self
            .update_locked(user_id, move |quota| quota.release(count, now))
            .await?;
        Ok(quota)
    }
}
