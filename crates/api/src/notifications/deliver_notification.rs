use crate::delivery::{deliver, DeliveryOutcome};
use crate::error::GatherError;
use crate::shared::{
    auth::protect_internal_route,
    locale::resolve_recipient_locale,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::deliver_notification::*;
use gather_notifier_domain::{Locale, NotificationEvent, ID};
use gather_notifier_infra::GatherContext;

/// Lets the application deliver any kind of notification to a user.
///
/// Delivery is best-effort, so this always answers `202 Accepted` and
/// reports per channel what happened.
pub async fn deliver_notification_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    protect_internal_route(&http_req, &ctx).await?;

    let body = body.0;
    let locale = resolve_recipient_locale(&ctx, &body.recipient_id, body.locale.as_deref()).await;
    let usecase = DeliverNotificationUseCase {
        recipient_id: body.recipient_id,
        locale,
        notification: body.notification,
    };

    execute(usecase, &ctx)
        .await
        .map(|outcome| {
            HttpResponse::Accepted().json(APIResponse {
                locale,
                workflow_triggered: outcome.workflow_triggered,
                push_sent: outcome.push.sent,
                push_failed: outcome.push.failed,
            })
        })
        .map_err(GatherError::from)
}

#[derive(Debug)]
pub struct DeliverNotificationUseCase {
    pub recipient_id: ID,
    pub locale: Locale,
    pub notification: NotificationEvent,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeliverNotificationUseCase {
    type Response = DeliveryOutcome;
    type Error = UseCaseError;

    const NAME: &'static str = "DeliverNotification";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        Ok(deliver(ctx, &self.recipient_id, self.locale, &self.notification).await)
    }
}
