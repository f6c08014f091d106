use crate::{APIResponse, BaseClient, ID};
use gather_notifier_api_structs::{cancel_event_reminders, schedule_event_reminders};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct ScheduleRemindersInput {
    pub event_id: ID,
    pub subscriber_id: ID,
    pub locale: Option<String>,
    pub event_title: String,
    pub event_slug: String,
    pub starts_at: i64,
    pub timezone: Option<String>,
    pub location_name: Option<String>,
    pub google_maps_url: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn schedule(
        &self,
        input: ScheduleRemindersInput,
    ) -> APIResponse<schedule_event_reminders::APIResponse> {
        let body = schedule_event_reminders::RequestBody {
            subscriber_id: input.subscriber_id,
            locale: input.locale,
            event_title: input.event_title,
            event_slug: input.event_slug,
            starts_at: input.starts_at,
            timezone: input.timezone,
            location_name: input.location_name,
            google_maps_url: input.google_maps_url,
        };
        self.base
            .post(
                body,
                format!("events/{}/reminders", input.event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn cancel(&self, event_id: ID) -> APIResponse<cancel_event_reminders::APIResponse> {
        self.base
            .delete(format!("events/{}/reminders", event_id), StatusCode::OK)
            .await
    }
}
