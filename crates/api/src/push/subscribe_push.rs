use crate::error::GatherError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::subscribe_push::*;
use gather_notifier_domain::{PushSubscription, ID};
use gather_notifier_infra::GatherContext;

pub async fn subscribe_push_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = SubscribePushUseCase {
        user_id: user.user_id,
        endpoint: body.endpoint,
        p256dh: body.keys.p256dh,
        auth: body.keys.auth,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Created().json(APIResponse::new(subscription)))
        .map_err(GatherError::from)
}

#[derive(Debug)]
pub struct SubscribePushUseCase {
    pub user_id: ID,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEndpoint(String),
    MissingKeys,
    StorageError,
}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEndpoint(endpoint) => {
                Self::BadClientData(format!("Invalid push endpoint provided: {}", endpoint))
            }
            UseCaseError::MissingKeys => {
                Self::BadClientData("Both the p256dh and the auth key are required".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubscribePushUseCase {
    type Response = PushSubscription;
    type Error = UseCaseError;

    const NAME: &'static str = "SubscribePush";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        if !PushSubscription::is_valid_endpoint(&self.endpoint) {
            return Err(UseCaseError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.p256dh.trim().is_empty() || self.auth.trim().is_empty() {
            return Err(UseCaseError::MissingKeys);
        }

        let subscription = PushSubscription::new(
            self.user_id,
            self.endpoint.clone(),
            self.p256dh.clone(),
            self.auth.clone(),
        );
        ctx.repos
            .push_subscriptions
            .upsert(&subscription)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
