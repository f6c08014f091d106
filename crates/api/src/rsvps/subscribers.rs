use super::rsvp_created::{RsvpCreated, RsvpCreatedUseCase};
use crate::delivery::{notify_new_rsvp_for_organizer, notify_rsvp_confirmation};
use crate::reminders::ScheduleEventRemindersUseCase;
use crate::shared::usecase::{execute, Subscriber};
use gather_notifier_infra::GatherContext;
use tracing::info;

pub struct SendConfirmationOnRsvpCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<RsvpCreatedUseCase> for SendConfirmationOnRsvpCreated {
    async fn notify(&self, e: &RsvpCreated, ctx: &GatherContext) {
        notify_rsvp_confirmation(ctx, &e.attendee_id, e.attendee_locale, e.event.clone()).await;
    }
}

pub struct NotifyOrganizerOnRsvpCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<RsvpCreatedUseCase> for NotifyOrganizerOnRsvpCreated {
    async fn notify(&self, e: &RsvpCreated, ctx: &GatherContext) {
        if let Some((organizer_id, locale)) = &e.organizer {
            notify_new_rsvp_for_organizer(
                ctx,
                organizer_id,
                *locale,
                (&e.event).into(),
                &e.attendee_name,
                e.going_count,
            )
            .await;
        }
    }
}

pub struct ScheduleRemindersOnRsvpCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<RsvpCreatedUseCase> for ScheduleRemindersOnRsvpCreated {
    async fn notify(&self, e: &RsvpCreated, ctx: &GatherContext) {
        let schedule_reminders = ScheduleEventRemindersUseCase {
            subscriber_id: e.attendee_id,
            locale: e.attendee_locale,
            event: e.event.clone(),
        };

        // Errors are logged by `execute`
        if let Ok(res) = execute(schedule_reminders, ctx).await {
            info!(
                "Scheduled reminders for: {} on event: {}. 24h: {}, 2h: {}",
                e.attendee_id, e.event.id, res.scheduled_24h, res.scheduled_2h
            );
        }
    }
}
