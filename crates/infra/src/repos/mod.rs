mod invite_quotas;
mod profiles;
mod push_subscriptions;
mod scheduled_reminders;
mod shared;

use invite_quotas::{InMemoryInviteQuotaRepo, PostgresInviteQuotaRepo};
use profiles::{InMemoryProfileRepo, PostgresProfileRepo};
use push_subscriptions::{InMemoryPushSubscriptionRepo, PostgresPushSubscriptionRepo};
use scheduled_reminders::{InMemoryScheduledReminderRepo, PostgresScheduledReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use invite_quotas::{IInviteQuotaRepo, QuotaReservation};
pub use profiles::IProfileRepo;
pub use push_subscriptions::IPushSubscriptionRepo;
pub use scheduled_reminders::IScheduledReminderRepo;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub push_subscriptions: Arc<dyn IPushSubscriptionRepo>,
    pub invite_quotas: Arc<dyn IInviteQuotaRepo>,
    pub scheduled_reminders: Arc<dyn IScheduledReminderRepo>,
    pub profiles: Arc<dyn IProfileRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            push_subscriptions: Arc::new(PostgresPushSubscriptionRepo::new(pool.clone())),
            invite_quotas: Arc::new(PostgresInviteQuotaRepo::new(pool.clone())),
            scheduled_reminders: Arc::new(PostgresScheduledReminderRepo::new(pool.clone())),
            profiles: Arc::new(PostgresProfileRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            push_subscriptions: Arc::new(InMemoryPushSubscriptionRepo::new()),
            invite_quotas: Arc::new(InMemoryInviteQuotaRepo::new()),
            scheduled_reminders: Arc::new(InMemoryScheduledReminderRepo::new()),
            profiles: Arc::new(InMemoryProfileRepo::new()),
        }
    }
}
