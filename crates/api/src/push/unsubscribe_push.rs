use crate::error::GatherError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::unsubscribe_push::*;
use gather_notifier_domain::ID;
use gather_notifier_infra::GatherContext;

pub async fn unsubscribe_push_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UnsubscribePushUseCase {
        user_id: user.user_id,
        endpoint: body.0.endpoint,
    };

    execute(usecase, &ctx)
        .await
        .map(|deleted| HttpResponse::Ok().json(APIResponse { deleted }))
        .map_err(GatherError::from)
}

/// Removes the subscription of the user for the given endpoint. Only the
/// owner can remove a subscription.
#[derive(Debug)]
pub struct UnsubscribePushUseCase {
    pub user_id: ID,
    pub endpoint: String,
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
impl UseCase for UnsubscribePushUseCase {
    type Response = bool;
    type Error = UseCaseError;

    const NAME: &'static str = "UnsubscribePush";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .push_subscriptions
            .delete_by_endpoint(&self.user_id, &self.endpoint)
            .await
            .map(|res| res.deleted_count > 0)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_domain::PushSubscription;

    #[actix_web::test]
    async fn only_the_owner_can_unsubscribe() {
        let ctx = GatherContext::create_inmemory();
        let owner = ID::default();
        let endpoint = "https://push.test/device";
        ctx.repos
            .push_subscriptions
            .upsert(&PushSubscription::new(
                owner,
                endpoint.into(),
                "p256dh".into(),
                "auth".into(),
            ))
            .await
            .unwrap();

        let deleted = execute(
            UnsubscribePushUseCase {
                user_id: ID::default(),
                endpoint: endpoint.into(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(!deleted);

        let deleted = execute(
            UnsubscribePushUseCase {
                user_id: owner,
                endpoint: endpoint.into(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(deleted);
        assert!(ctx
            .repos
            .push_subscriptions
            .find_by_user(&owner)
            .await
            .unwrap()
            .is_empty());
    }
}
