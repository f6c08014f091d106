//! Delivery of notifications to every channel a user can be reached on.
//!
//! All of the `notify_*` functions are best-effort: they are called as a
//! side effect of some primary action, and a failing channel must never fail
//! that action. Channel failures are logged, and the returned outcome is only
//! of interest to callers that count deliveries.

use super::send_push_to_user::{send_push_to_user, PushDeliveryResult};
use gather_notifier_domain::{
    EventDetails, EventRef, Locale, NotificationEvent, PushMessage, TemplateRenderer, ID,
};
use gather_notifier_infra::{GatherContext, TriggerRequest};
use tracing::error;

/// What happened on each channel for one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub workflow_triggered: bool,
    pub push: PushDeliveryResult,
}

impl DeliveryOutcome {
    /// A notification is delivered when at least one channel accepted it
    pub fn accepted(&self) -> bool {
        self.workflow_triggered || self.push.sent > 0
    }
}

pub fn renderer(ctx: &GatherContext) -> TemplateRenderer {
    TemplateRenderer::new(ctx.config.app_base_url.as_str())
}

/// Renders the notification once and delivers it through the workflow
/// engine and to the recipient's push subscriptions concurrently.
#[tracing::instrument(name = "Deliver notification", skip(ctx, notification), fields(kind = ?notification.kind()))]
pub async fn deliver(
    ctx: &GatherContext,
    recipient_id: &ID,
    locale: Locale,
    notification: &NotificationEvent,
) -> DeliveryOutcome {
    let kind = notification.kind();
    let rendered = renderer(ctx).render(notification, locale);

    let trigger = TriggerRequest::new(
        kind.workflow_key(),
        recipient_id.to_string(),
        notification.workflow_payload(&rendered, locale),
    );
    let push_message = PushMessage::from_rendered(kind, notification.event_slug(), &rendered);

    let (workflow_res, push) = futures::join!(
        ctx.services.workflow_engine.trigger(&trigger),
        send_push_to_user(ctx, recipient_id, push_message)
    );

    let workflow_triggered = match workflow_res {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Unable to trigger workflow: {} for: {}. Error: {}",
                trigger.workflow_key, recipient_id, e
            );
            false
        }
    };

    DeliveryOutcome {
        workflow_triggered,
        push,
    }
}

pub async fn notify_rsvp_confirmation(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event: EventDetails,
) -> DeliveryOutcome {
    let notification = NotificationEvent::RsvpConfirmation { event };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_confirm_attendance_24h(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event: EventDetails,
) -> DeliveryOutcome {
    let notification = NotificationEvent::ConfirmAttendance24h { event };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_final_reminder_2h(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event: EventDetails,
) -> DeliveryOutcome {
    let notification = NotificationEvent::FinalReminder2h { event };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_waitlist_promotion(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event_title: &str,
    event_slug: &str,
) -> DeliveryOutcome {
    let notification = NotificationEvent::WaitlistPromotion {
        event: EventRef {
            title: event_title.to_string(),
            slug: event_slug.to_string(),
        },
    };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_event_reminder(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event: EventDetails,
) -> DeliveryOutcome {
    let notification = NotificationEvent::EventReminder { event };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_confirm_attendance(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event_title: &str,
    event_slug: &str,
) -> DeliveryOutcome {
    let notification = NotificationEvent::ConfirmAttendance {
        event: EventRef {
            title: event_title.to_string(),
            slug: event_slug.to_string(),
        },
    };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_waitlist_position_update(
    ctx: &GatherContext,
    user_id: &ID,
    locale: Locale,
    event_title: &str,
    event_slug: &str,
    position: u32,
) -> DeliveryOutcome {
    let notification = NotificationEvent::WaitlistPositionUpdate {
        event: EventRef {
            title: event_title.to_string(),
            slug: event_slug.to_string(),
        },
        position,
    };
    deliver(ctx, user_id, locale, &notification).await
}

pub async fn notify_new_rsvp_for_organizer(
    ctx: &GatherContext,
    organizer_id: &ID,
    locale: Locale,
    event: EventRef,
    attendee_name: &str,
    going_count: u32,
) -> DeliveryOutcome {
    let notification = NotificationEvent::NewRsvpForOrganizer {
        event,
        attendee_name: attendee_name.to_string(),
        going_count,
    };
    deliver(ctx, organizer_id, locale, &notification).await
}

pub async fn notify_event_invitation(
    ctx: &GatherContext,
    invitee_id: &ID,
    locale: Locale,
    event: EventDetails,
    inviter_name: &str,
) -> DeliveryOutcome {
    let notification = NotificationEvent::EventInvitation {
        event,
        inviter_name: inviter_name.to_string(),
    };
    deliver(ctx, invitee_id, locale, &notification).await
}
