use crate::delivery::renderer;
use crate::error::GatherError;
use crate::shared::{
    auth::protect_internal_route,
    locale::resolve_recipient_locale,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono_tz::Tz;
use gather_notifier_api_structs::schedule_event_reminders::*;
use gather_notifier_domain::{plan_reminders, EventDetails, Locale, ReminderKind, ID};
use gather_notifier_infra::{GatherContext, TriggerRequest};
use tracing::{error, info};

pub async fn schedule_event_reminders_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    protect_internal_route(&http_req, &ctx).await?;

    let body = body.0;
    let timezone = match &body.timezone {
        Some(timezone) => timezone.parse::<Tz>().map_err(|_| {
            GatherError::BadClientData(format!("Invalid timezone provided: {}", timezone))
        })?,
        None => Tz::UTC,
    };
    let locale =
        resolve_recipient_locale(&ctx, &body.subscriber_id, body.locale.as_deref()).await;

    let usecase = ScheduleEventRemindersUseCase {
        subscriber_id: body.subscriber_id,
        locale,
        event: EventDetails {
            id: path.event_id,
            title: body.event_title,
            slug: body.event_slug,
            starts_at: body.starts_at,
            timezone,
            location_name: body.location_name,
            google_maps_url: body.google_maps_url,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                scheduled_24h: res.scheduled_24h,
                scheduled_2h: res.scheduled_2h,
            })
        })
        .map_err(GatherError::from)
}

/// Hands the 24h confirmation and the 2h final reminder for an event to the
/// delay mechanism of the workflow engine.
///
/// Reminders whose time has already passed are skipped. Reminders scheduled
/// earlier for the same subscriber and event are cancelled first, so this
/// also reschedules. A kind whose previous reminder could not be cancelled
/// keeps that reminder and is not scheduled again.
#[derive(Debug)]
pub struct ScheduleEventRemindersUseCase {
    pub subscriber_id: ID,
    pub locale: Locale,
    pub event: EventDetails,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UseCaseRes {
    pub scheduled_24h: bool,
    pub scheduled_2h: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleEventRemindersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleEventReminders";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        let previous = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&self.event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        // Kinds whose previous trigger may still fire
        let mut still_pending = Vec::new();
        for reminder in previous
            .into_iter()
            .filter(|r| r.subscriber_id == self.subscriber_id)
        {
            if let Err(e) = ctx
                .services
                .workflow_engine
                .cancel(&reminder.transaction_id)
                .await
            {
                error!(
                    "Unable to cancel previous reminder: {}, keeping it. Error: {}",
                    reminder.transaction_id, e
                );
                still_pending.push(reminder.kind);
                continue;
            }
            if let Err(e) = ctx
                .repos
                .scheduled_reminders
                .delete(&reminder.event_id, &reminder.subscriber_id, reminder.kind)
                .await
            {
                error!(
                    "Unable to delete previous reminder: {}. Error: {:?}",
                    reminder.transaction_id, e
                );
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let renderer = renderer(ctx);
        let mut res = UseCaseRes {
            scheduled_24h: false,
            scheduled_2h: false,
        };

        for reminder in plan_reminders(self.event.id, self.subscriber_id, self.event.starts_at, now)
            .into_iter()
            .filter(|r| !still_pending.contains(&r.kind))
        {
            let notification = reminder.kind.notification(self.event.clone());
            let rendered = renderer.render(&notification, self.locale);
            let trigger = TriggerRequest::new(
                notification.kind().workflow_key(),
                self.subscriber_id.to_string(),
                notification.workflow_payload(&rendered, self.locale),
            )
            .delayed(reminder.delay_until, reminder.transaction_id.clone());

            if let Err(e) = ctx.services.workflow_engine.trigger(&trigger).await {
                error!(
                    "Unable to schedule reminder: {}. Error: {}",
                    reminder.transaction_id, e
                );
                continue;
            }
            if let Err(e) = ctx.repos.scheduled_reminders.upsert(&reminder).await {
                // The reminder still fires, it just can not be cancelled anymore
                error!(
                    "Unable to store handle of reminder: {}. Error: {:?}",
                    reminder.transaction_id, e
                );
            }

            match reminder.kind {
                ReminderKind::Confirm24h => res.scheduled_24h = true,
                ReminderKind::Final2h => res.scheduled_2h = true,
            }
        }

        if !res.scheduled_24h && !res.scheduled_2h {
            info!(
                "No reminders scheduled for event: {} and subscriber: {}",
                self.event.id, self.subscriber_id
            );
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_infra::InMemoryHandles;

    const HOUR: i64 = 1000 * 60 * 60;

    fn event(starts_at: i64) -> EventDetails {
        EventDetails {
            id: ID::default(),
            title: "Beach BBQ".into(),
            slug: "beach-bbq".into(),
            starts_at,
            timezone: Tz::UTC,
            location_name: None,
            google_maps_url: None,
        }
    }

    fn setup() -> (GatherContext, InMemoryHandles, i64) {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let now = 1_710_000_000_000;
        handles.sys.set(now);
        (ctx, handles, now)
    }

    #[actix_web::test]
    async fn it_skips_reminders_in_the_past() {
        let (ctx, handles, now) = setup();
        let usecase = ScheduleEventRemindersUseCase {
            subscriber_id: ID::default(),
            locale: Locale::En,
            event: event(now + 10 * HOUR),
        };

        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(
            res,
            UseCaseRes {
                scheduled_24h: false,
                scheduled_2h: true
            }
        );

        let triggers = handles.workflow_engine.triggers();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].workflow_key, "2h-reminder");
        assert_eq!(triggers[0].delay_till, Some(now + 8 * HOUR));
    }

    #[actix_web::test]
    async fn it_schedules_both_and_tracks_handles() {
        let (ctx, handles, now) = setup();
        let subscriber_id = ID::default();
        let event = event(now + 48 * HOUR);
        let usecase = ScheduleEventRemindersUseCase {
            subscriber_id,
            locale: Locale::Ko,
            event: event.clone(),
        };

        let res = execute(usecase, &ctx).await.unwrap();
        assert!(res.scheduled_24h && res.scheduled_2h);

        let triggers = handles.workflow_engine.triggers();
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].workflow_key, "24h-re-confirmation");
        let transaction_id = triggers[0].transaction_id.clone().unwrap();
        assert!(transaction_id.starts_with(&format!(
            "reminder:{}:{}:24h:",
            event.id, subscriber_id
        )));
        assert_eq!(triggers[0].payload["locale"], "ko");

        let handles = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event.id)
            .await
            .unwrap();
        assert_eq!(handles.len(), 2);
    }

    #[actix_web::test]
    async fn rescheduling_cancels_previous_reminders() {
        let (ctx, handles, now) = setup();
        let subscriber_id = ID::default();
        let mut event = event(now + 48 * HOUR);

        execute(
            ScheduleEventRemindersUseCase {
                subscriber_id,
                locale: Locale::En,
                event: event.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        event.starts_at = now + 72 * HOUR;
        execute(
            ScheduleEventRemindersUseCase {
                subscriber_id,
                locale: Locale::En,
                event: event.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        let cancelled = handles.workflow_engine.cancelled();
        assert_eq!(cancelled.len(), 2);
        let triggers = handles.workflow_engine.triggers();
        assert_eq!(triggers.len(), 4);
        assert!(triggers[2..]
            .iter()
            .all(|t| !cancelled.contains(t.transaction_id.as_ref().unwrap())));

        let stored = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored
            .iter()
            .any(|r| r.delay_until == now + 48 * HOUR && r.kind == ReminderKind::Confirm24h));
        assert!(stored.iter().all(|r| triggers[2..]
            .iter()
            .any(|t| t.transaction_id.as_ref() == Some(&r.transaction_id))));
    }

    #[actix_web::test]
    async fn rescheduling_same_start_uses_fresh_transaction_ids() {
        let (ctx, handles, now) = setup();
        let subscriber_id = ID::default();
        let event = event(now + 48 * HOUR);
        let schedule = || ScheduleEventRemindersUseCase {
            subscriber_id,
            locale: Locale::En,
            event: event.clone(),
        };

        assert!(execute(schedule(), &ctx).await.unwrap().scheduled_24h);
        let res = execute(schedule(), &ctx).await.unwrap();
        assert!(res.scheduled_24h && res.scheduled_2h);
        assert_eq!(handles.workflow_engine.triggers().len(), 4);
    }

    #[actix_web::test]
    async fn failed_cancel_keeps_previous_reminder() {
        let (ctx, handles, now) = setup();
        let subscriber_id = ID::default();
        let mut event = event(now + 48 * HOUR);
        let schedule = |event: EventDetails| ScheduleEventRemindersUseCase {
            subscriber_id,
            locale: Locale::En,
            event,
        };

        execute(schedule(event.clone()), &ctx).await.unwrap();
        let before = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event.id)
            .await
            .unwrap();

        handles.workflow_engine.set_failing_cancel(true);
        event.starts_at = now + 72 * HOUR;
        let res = execute(schedule(event.clone()), &ctx).await.unwrap();
        assert_eq!(
            res,
            UseCaseRes {
                scheduled_24h: false,
                scheduled_2h: false
            }
        );
        assert_eq!(handles.workflow_engine.triggers().len(), 2);

        let after = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event.id)
            .await
            .unwrap();
        assert_eq!(after.len(), 2);
        assert!(before.iter().all(|r| after.contains(r)));
    }

    #[actix_web::test]
    async fn failed_trigger_is_reported_as_not_scheduled() {
        let (ctx, handles, now) = setup();
        handles.workflow_engine.set_failing(true);
        let event = event(now + 48 * HOUR);

        let res = execute(
            ScheduleEventRemindersUseCase {
                subscriber_id: ID::default(),
                locale: Locale::En,
                event: event.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(!res.scheduled_24h && !res.scheduled_2h);
        assert!(ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event.id)
            .await
            .unwrap()
            .is_empty());
    }
}
