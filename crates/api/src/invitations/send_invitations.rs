use crate::delivery::notify_event_invitation;
use crate::error::GatherError;
use crate::invitations::quota_guard::{release_quota, reserve_quota};
use crate::shared::{
    auth::protect_route,
    locale::resolve_recipient_locale,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use futures::future::join_all;
use gather_notifier_api_structs::send_invitations::*;
use gather_notifier_domain::{EventDetails, QuotaExceededReason, ID};
use gather_notifier_infra::GatherContext;
use tracing::error;

const FALLBACK_INVITER_NAME: &str = "Someone";

pub async fn send_invitations_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = SendInvitationsUseCase {
        inviter_id: user.user_id,
        inviter_name: body.inviter_name,
        event: body.event,
        invitees: body.invitees,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                sent: res.sent,
                failed: res.failed,
                remaining_daily: res.remaining_daily,
                remaining_weekly: res.remaining_weekly,
            })
        })
        .map_err(GatherError::from)
}

/// Invites users to an event, bounded by the invitation quota of the
/// inviter.
///
/// The quota for all invitees is reserved up front, and afterwards the
/// invitations that reached nobody are given back, so only the ones that
/// reached the invitee through at least one channel stay counted.
#[derive(Debug)]
pub struct SendInvitationsUseCase {
    pub inviter_id: ID,
    pub inviter_name: Option<String>,
    pub event: EventDetails,
    pub invitees: Vec<ID>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UseCaseRes {
    pub sent: u32,
    pub failed: u32,
    pub remaining_daily: u32,
    pub remaining_weekly: u32,
}

#[derive(Debug)]
pub enum UseCaseError {
    NoInvitees,
    QuotaExceeded(QuotaExceededReason),
    StorageError,
}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NoInvitees => {
                Self::BadClientData("At least one invitee must be provided".into())
            }
            UseCaseError::QuotaExceeded(reason) => Self::TooManyRequests(reason.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl SendInvitationsUseCase {
    async fn inviter_name(&self, ctx: &GatherContext) -> String {
        if let Some(name) = &self.inviter_name {
            return name.clone();
        }
        match ctx.repos.profiles.find(&self.inviter_id).await {
            Ok(Some(profile)) => profile
                .display_name
                .unwrap_or_else(|| FALLBACK_INVITER_NAME.to_string()),
            Ok(None) => FALLBACK_INVITER_NAME.to_string(),
            Err(e) => {
                error!(
                    "Unable to read profile of inviter: {}. Error: {:?}",
                    self.inviter_id, e
                );
                FALLBACK_INVITER_NAME.to_string()
            }
        }
    }

    async fn invite(&self, ctx: &GatherContext, invitee_id: ID, inviter_name: &str) -> bool {
        let locale = resolve_recipient_locale(ctx, &invitee_id, None).await;
        notify_event_invitation(ctx, &invitee_id, locale, self.event.clone(), inviter_name)
            .await
            .accepted()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendInvitationsUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendInvitations";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        let mut invitees = Vec::with_capacity(self.invitees.len());
        for invitee in &self.invitees {
            if *invitee != self.inviter_id && !invitees.contains(invitee) {
                invitees.push(*invitee);
            }
        }
        if invitees.is_empty() {
            return Err(UseCaseError::NoInvitees);
        }

        let requested = invitees.len() as u32;
        let reservation = reserve_quota(ctx, &self.inviter_id, requested)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if let Some(reason) = reservation.check.reason {
            return Err(UseCaseError::QuotaExceeded(reason));
        }

        let inviter_name = self.inviter_name(ctx).await;
        let deliveries = invitees
            .iter()
            .map(|invitee_id| self.invite(ctx, *invitee_id, &inviter_name))
            .collect::<Vec<_>>();
        let sent = join_all(deliveries)
            .await
            .into_iter()
            .filter(|accepted| *accepted)
            .count() as u32;
        let failed = requested - sent;

        let limits = &ctx.config.invite_limits;
        let mut quota = reservation.quota;
        if failed > 0 {
            match release_quota(ctx, &self.inviter_id, failed).await {
                Ok(released) => quota = released,
                Err(e) => error!(
                    "Unable to give back {} invitations of: {}. Error: {:?}",
                    failed, self.inviter_id, e
                ),
            }
        }
        let (remaining_daily, remaining_weekly) =
            quota.remaining(limits, ctx.sys.get_timestamp_millis());

        Ok(UseCaseRes {
            sent,
            failed,
            remaining_daily,
            remaining_weekly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use gather_notifier_domain::{Profile, PushSubscription, QuotaLimits};
    use gather_notifier_infra::InMemoryHandles;

    fn event() -> EventDetails {
        EventDetails {
            id: ID::default(),
            title: "Beach BBQ".into(),
            slug: "beach-bbq".into(),
            starts_at: 1_710_590_400_000,
            timezone: Tz::UTC,
            location_name: None,
            google_maps_url: None,
        }
    }

    fn setup(daily: u32) -> (GatherContext, InMemoryHandles) {
        let (mut ctx, handles) = GatherContext::create_inmemory_with_handles();
        ctx.config.invite_limits = QuotaLimits { daily, weekly: 100 };
        (ctx, handles)
    }

    #[actix_web::test]
    async fn it_invites_and_counts_quota() {
        let (ctx, handles) = setup(5);
        let inviter_id = ID::default();
        let invitees = vec![ID::default(), ID::default()];
        let mut profile = Profile::new(invitees[1]);
        profile.locale = Some("vi".into());
        ctx.repos.profiles.save(&profile).await.unwrap();

        let res = execute(
            SendInvitationsUseCase {
                inviter_id,
                inviter_name: Some("Minh".into()),
                event: event(),
                invitees: invitees.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(
            res,
            UseCaseRes {
                sent: 2,
                failed: 0,
                remaining_daily: 3,
                remaining_weekly: 98
            }
        );

        let triggers = handles.workflow_engine.triggers();
        assert_eq!(triggers.len(), 2);
        assert!(triggers.iter().all(|t| t.workflow_key == "event-invitation"));
        let vi_trigger = triggers
            .iter()
            .find(|t| t.subscriber_id == invitees[1].to_string())
            .unwrap();
        assert_eq!(
            vi_trigger.payload["message"],
            "💌 Minh đã mời bạn tham gia \"Beach BBQ\""
        );
    }

    #[actix_web::test]
    async fn it_rejects_when_quota_is_exceeded() {
        let (ctx, handles) = setup(1);
        let res = execute(
            SendInvitationsUseCase {
                inviter_id: ID::default(),
                inviter_name: None,
                event: event(),
                invitees: vec![ID::default(), ID::default()],
            },
            &ctx,
        )
        .await;
        assert!(matches!(
            res,
            Err(UseCaseError::QuotaExceeded(
                QuotaExceededReason::DailyLimitReached
            ))
        ));
        assert!(handles.workflow_engine.calls().is_empty());
    }

    #[actix_web::test]
    async fn only_accepted_invitations_are_counted() {
        let (ctx, handles) = setup(5);
        handles.workflow_engine.set_failing(true);
        let inviter_id = ID::default();
        let reachable = ID::default();
        ctx.repos
            .push_subscriptions
            .upsert(&PushSubscription::new(
                reachable,
                "https://push.test/reachable".into(),
                "p256dh".into(),
                "auth".into(),
            ))
            .await
            .unwrap();

        let res = execute(
            SendInvitationsUseCase {
                inviter_id,
                inviter_name: None,
                event: event(),
                invitees: vec![reachable, ID::default(), reachable, inviter_id],
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(res.sent, 1);
        assert_eq!(res.failed, 1);
        assert_eq!(res.remaining_daily, 4);
        assert_eq!(
            handles.push.delivered()[0].1.title,
            "💌 Someone invited you to \"Beach BBQ\""
        );
    }

    #[actix_web::test]
    async fn concurrent_batches_share_one_quota() {
        let (ctx, handles) = setup(2);
        let inviter_id = ID::default();
        let batch = || SendInvitationsUseCase {
            inviter_id,
            inviter_name: None,
            event: event(),
            invitees: vec![ID::default(), ID::default()],
        };

        let (a, b) = futures::join!(execute(batch(), &ctx), execute(batch(), &ctx));
        let results = [a, b];
        let accepted = results.iter().filter(|res| res.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|res| {
                matches!(
                    res,
                    Err(UseCaseError::QuotaExceeded(
                        QuotaExceededReason::DailyLimitReached
                    ))
                )
            })
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(rejected, 1);
        assert_eq!(handles.workflow_engine.triggers().len(), 2);

        let quota = ctx
            .repos
            .invite_quotas
            .find(&inviter_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(quota.daily_count, 2);
    }

    #[actix_web::test]
    async fn it_rejects_empty_invitee_list() {
        let (ctx, _) = setup(5);
        let inviter_id = ID::default();
        let res = execute(
            SendInvitationsUseCase {
                inviter_id,
                inviter_name: None,
                event: event(),
                invitees: vec![inviter_id],
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::NoInvitees)));
    }
}
