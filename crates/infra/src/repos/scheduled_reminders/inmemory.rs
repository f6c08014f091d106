use super::IScheduledReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use gather_notifier_domain::{ReminderKind, ScheduledReminder, ID};

pub struct InMemoryScheduledReminderRepo {
    reminders: std::sync::Mutex<Vec<ScheduledReminder>>,
}

impl InMemoryScheduledReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledReminderRepo for InMemoryScheduledReminderRepo {
    async fn upsert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()> {
        upsert_by(
            reminder,
            &self.reminders,
            |r| {
                r.event_id == reminder.event_id
                    && r.subscriber_id == reminder.subscriber_id
                    && r.kind == reminder.kind
            },
            |r| *r = reminder.clone(),
        );
        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<ScheduledReminder>> {
        Ok(find_by(&self.reminders, |r| r.event_id == *event_id))
    }

    async fn delete(
        &self,
        event_id: &ID,
        subscriber_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| {
            r.event_id == *event_id && r.subscriber_id == *subscriber_id && r.kind == kind
        }))
    }
}
