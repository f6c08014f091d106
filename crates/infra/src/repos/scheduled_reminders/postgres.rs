use super::IScheduledReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use gather_notifier_domain::{ReminderKind, ScheduledReminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresScheduledReminderRepo {
    pool: PgPool,
}

impl PostgresScheduledReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledReminderRaw {
    event_uid: Uuid,
    subscriber_uid: Uuid,
    kind: String,
    transaction_id: String,
    delay_until: i64,
}

impl TryFrom<ScheduledReminderRaw> for ScheduledReminder {
    type Error = anyhow::Error;

    fn try_from(raw: ScheduledReminderRaw) -> anyhow::Result<Self> {
        Ok(Self {
            event_id: raw.event_uid.into(),
            subscriber_id: raw.subscriber_uid.into(),
            kind: raw.kind.parse()?,
            transaction_id: raw.transaction_id,
            delay_until: raw.delay_until,
        })
    }
}

#[async_trait::async_trait]
impl IScheduledReminderRepo for PostgresScheduledReminderRepo {
    async fn upsert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_reminders(event_uid, subscriber_uid, kind, transaction_id, delay_until)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (event_uid, subscriber_uid, kind) DO UPDATE
            SET transaction_id = EXCLUDED.transaction_id,
            delay_until = EXCLUDED.delay_until
            "#,
        )
        .bind(reminder.event_id.inner_ref())
        .bind(reminder.subscriber_id.inner_ref())
        .bind(reminder.kind.as_str())
        .bind(&reminder.transaction_id)
        .bind(reminder.delay_until)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<ScheduledReminder>> {
        let reminders: Vec<ScheduledReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_reminders
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        reminders.into_iter().map(|r| r.try_into()).collect()
    }

    async fn delete(
        &self,
        event_id: &ID,
        subscriber_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM scheduled_reminders
            WHERE event_uid = $1 AND subscriber_uid = $2 AND kind = $3
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(subscriber_id.inner_ref())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
