mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use gather_notifier_domain::{ReminderKind, ScheduledReminder, ID};
pub use inmemory::InMemoryScheduledReminderRepo;
pub use postgres::PostgresScheduledReminderRepo;

#[async_trait::async_trait]
pub trait IScheduledReminderRepo: Send + Sync {
    /// Stores the handle, replacing an earlier one for the same event,
    /// subscriber and kind
    async fn upsert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<ScheduledReminder>>;
    async fn delete(
        &self,
        event_id: &ID,
        subscriber_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GatherContext;

    #[tokio::test]
    async fn it_replaces_handle_for_same_key() {
        let ctx = GatherContext::create_inmemory();
        let event_id = ID::default();
        let subscriber_id = ID::default();

        let first = ScheduledReminder::new(event_id, subscriber_id, ReminderKind::Final2h, 1000);
        let second = ScheduledReminder::new(event_id, subscriber_id, ReminderKind::Final2h, 5000);
        let other = ScheduledReminder::new(event_id, subscriber_id, ReminderKind::Confirm24h, 5000);
        for reminder in [&first, &second, &other] {
            ctx.repos.scheduled_reminders.upsert(reminder).await.unwrap();
        }

        let stored = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event_id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.contains(&second));
        assert!(stored.contains(&other));

        let res = ctx
            .repos
            .scheduled_reminders
            .delete(&event_id, &subscriber_id, ReminderKind::Final2h)
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(ctx
            .repos
            .scheduled_reminders
            .find_by_event(&ID::default())
            .await
            .unwrap()
            .is_empty());
    }
}
