use crate::error::GatherError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::cancel_event_reminders::*;
use gather_notifier_domain::ID;
use gather_notifier_infra::GatherContext;
use tracing::error;

pub async fn cancel_event_reminders_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    protect_internal_route(&http_req, &ctx).await?;

    let usecase = CancelEventRemindersUseCase {
        event_id: path.event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                cancelled: res.cancelled,
                failed: res.failed,
            })
        })
        .map_err(GatherError::from)
}

/// Cancels every reminder scheduled for an event, for instance because
/// the event was cancelled or moved.
///
/// Handles are only forgotten once the workflow engine has cancelled them,
/// so a failed cancellation can be retried.
#[derive(Debug)]
pub struct CancelEventRemindersUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UseCaseRes {
    pub cancelled: usize,
    pub failed: usize,
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
impl UseCase for CancelEventRemindersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CancelEventReminders";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx
            .repos
            .scheduled_reminders
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut res = UseCaseRes {
            cancelled: 0,
            failed: 0,
        };
        for reminder in reminders {
            match ctx
                .services
                .workflow_engine
                .cancel(&reminder.transaction_id)
                .await
            {
                Ok(()) => {
                    ctx.repos
                        .scheduled_reminders
                        .delete(&reminder.event_id, &reminder.subscriber_id, reminder.kind)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;
                    res.cancelled += 1;
                }
                Err(e) => {
                    error!(
                        "Unable to cancel reminder: {}. Error: {}",
                        reminder.transaction_id, e
                    );
                    res.failed += 1;
                }
            }
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::ScheduleEventRemindersUseCase;
    use chrono_tz::Tz;
    use gather_notifier_domain::{EventDetails, Locale};

    #[actix_web::test]
    async fn it_cancels_every_subscriber_of_event() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let now = 1_710_000_000_000;
        handles.sys.set(now);
        let event = EventDetails {
            id: ID::default(),
            title: "Beach BBQ".into(),
            slug: "beach-bbq".into(),
            starts_at: now + 1000 * 60 * 60 * 48,
            timezone: Tz::UTC,
            location_name: None,
            google_maps_url: None,
        };
        for _ in 0..2 {
            execute(
                ScheduleEventRemindersUseCase {
                    subscriber_id: ID::default(),
                    locale: Locale::En,
                    event: event.clone(),
                },
                &ctx,
            )
            .await
            .unwrap();
        }

        handles.workflow_engine.set_failing(true);
        let res = execute(CancelEventRemindersUseCase { event_id: event.id }, &ctx)
            .await
            .unwrap();
        assert_eq!(res, UseCaseRes { cancelled: 0, failed: 4 });

        handles.workflow_engine.set_failing(false);
        let res = execute(CancelEventRemindersUseCase { event_id: event.id }, &ctx)
            .await
            .unwrap();
        assert_eq!(res, UseCaseRes { cancelled: 4, failed: 0 });
        assert_eq!(handles.workflow_engine.cancelled().len(), 4);
        assert!(ctx
            .repos
            .scheduled_reminders
            .find_by_event(&event.id)
            .await
            .unwrap()
            .is_empty());
    }
}
