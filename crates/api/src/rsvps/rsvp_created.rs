use super::subscribers::{
    NotifyOrganizerOnRsvpCreated, ScheduleRemindersOnRsvpCreated, SendConfirmationOnRsvpCreated,
};
use crate::error::GatherError;
use crate::shared::{
    auth::protect_internal_route,
    locale::resolve_recipient_locale,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::rsvp_created::*;
use gather_notifier_domain::{EventDetails, Locale, ID};
use gather_notifier_infra::GatherContext;

/// Called by the application after a user RSVPed to an event.
///
/// Notifications are sent as side effects, so the application only has to
/// wait for the recipients' locales to be resolved.
pub async fn rsvp_created_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    protect_internal_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = RsvpCreatedUseCase {
        attendee_id: body.attendee_id,
        attendee_name: body.attendee_name,
        locale: body.locale,
        organizer_id: body.organizer_id,
        going_count: body.going_count,
        event: body.event,
    };

    execute(usecase, &ctx)
        .await
        .map(|rsvp| {
            HttpResponse::Accepted().json(APIResponse {
                attendee_locale: rsvp.attendee_locale,
            })
        })
        .map_err(GatherError::from)
}

#[derive(Debug)]
pub struct RsvpCreatedUseCase {
    pub attendee_id: ID,
    pub attendee_name: String,
    pub locale: Option<String>,
    pub organizer_id: Option<ID>,
    pub going_count: u32,
    pub event: EventDetails,
}

/// An RSVP with the locale of everyone that should hear about it
#[derive(Debug, Clone)]
pub struct RsvpCreated {
    pub attendee_id: ID,
    pub attendee_name: String,
    pub attendee_locale: Locale,
    /// Missing when the attendee organizes the event themselves
    pub organizer: Option<(ID, Locale)>,
    pub going_count: u32,
    pub event: EventDetails,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RsvpCreatedUseCase {
    type Response = RsvpCreated;
    type Error = UseCaseError;

    const NAME: &'static str = "RsvpCreated";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        let attendee_locale =
            resolve_recipient_locale(ctx, &self.attendee_id, self.locale.as_deref()).await;

        let organizer = match self.organizer_id {
            Some(organizer_id) if organizer_id != self.attendee_id => {
                let locale = resolve_recipient_locale(ctx, &organizer_id, None).await;
                Some((organizer_id, locale))
            }
            _ => None,
        };

        Ok(RsvpCreated {
            attendee_id: self.attendee_id,
            attendee_name: self.attendee_name.clone(),
            attendee_locale,
            organizer,
            going_count: self.going_count,
            event: self.event.clone(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(SendConfirmationOnRsvpCreated),
            Box::new(NotifyOrganizerOnRsvpCreated),
            Box::new(ScheduleRemindersOnRsvpCreated),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use gather_notifier_domain::{Profile, DAY_MILLIS};

    fn usecase(ctx: &GatherContext, attendee_id: ID, organizer_id: Option<ID>) -> RsvpCreatedUseCase {
        RsvpCreatedUseCase {
            attendee_id,
            attendee_name: "Linh".into(),
            locale: None,
            organizer_id,
            going_count: 12,
            event: EventDetails {
                id: ID::default(),
                title: "Beach BBQ".into(),
                slug: "beach-bbq".into(),
                starts_at: ctx.sys.get_timestamp_millis() + 3 * DAY_MILLIS,
                timezone: Tz::UTC,
                location_name: None,
                google_maps_url: None,
            },
        }
    }

    #[actix_web::test]
    async fn it_notifies_attendee_and_organizer_in_their_locales() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let attendee_id = ID::default();
        let organizer_id = ID::default();
        let mut organizer = Profile::new(organizer_id);
        organizer.locale = Some("ko".into());
        ctx.repos.profiles.save(&organizer).await.unwrap();

        let rsvp = execute(usecase(&ctx, attendee_id, Some(organizer_id)), &ctx)
            .await
            .unwrap();
        assert_eq!(rsvp.attendee_locale, Locale::En);
        assert_eq!(rsvp.organizer, Some((organizer_id, Locale::Ko)));

        let triggers = handles.workflow_engine.triggers();
        let confirmation = triggers
            .iter()
            .find(|t| t.workflow_key == "rsvp")
            .expect("Attendee to get a confirmation");
        assert_eq!(confirmation.subscriber_id, attendee_id.to_string());

        let organizer_trigger = triggers
            .iter()
            .find(|t| t.workflow_key == "new-rsvp-organizer")
            .expect("Organizer to be notified");
        assert_eq!(organizer_trigger.subscriber_id, organizer_id.to_string());
        assert_eq!(organizer_trigger.payload["locale"], "ko");

        let reminders = triggers
            .iter()
            .filter(|t| t.transaction_id.is_some())
            .count();
        assert_eq!(reminders, 2);
    }

    #[actix_web::test]
    async fn organizer_is_not_notified_of_own_rsvp() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let organizer_id = ID::default();

        let rsvp = execute(usecase(&ctx, organizer_id, Some(organizer_id)), &ctx)
            .await
            .unwrap();
        assert!(rsvp.organizer.is_none());
        assert!(handles
            .workflow_engine
            .triggers()
            .iter()
            .all(|t| t.workflow_key != "new-rsvp-organizer"));
    }

    #[actix_web::test]
    async fn rsvp_succeeds_when_no_reminder_could_be_scheduled() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        handles.workflow_engine.set_failing(true);
        let attendee_id = ID::default();

        let rsvp = execute(usecase(&ctx, attendee_id, None), &ctx)
            .await
            .unwrap();
        assert_eq!(rsvp.attendee_id, attendee_id);
        assert!(ctx
            .repos
            .scheduled_reminders
            .find_by_event(&rsvp.event.id)
            .await
            .unwrap()
            .is_empty());
    }
}
