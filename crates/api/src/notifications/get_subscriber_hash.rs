use crate::error::GatherError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::get_subscriber_hash::*;
use gather_notifier_domain::{generate_subscriber_hash, ID};
use gather_notifier_infra::GatherContext;
use tracing::error;

/// Gives the signed in user what the in-app inbox widget needs to connect
/// to the workflow engine as that user.
pub async fn get_subscriber_hash_controller(
    http_req: HttpRequest,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSubscriberHashUseCase {
        user_id: user.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscriber_hash| {
            HttpResponse::Ok().json(APIResponse {
                subscriber_id: user.user_id.to_string(),
                subscriber_hash,
            })
        })
        .map_err(GatherError::from)
}

#[derive(Debug)]
pub struct GetSubscriberHashUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    SecretNotConfigured,
}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SecretNotConfigured => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriberHashUseCase {
    type Response = String;
    type Error = UseCaseError;

    const NAME: &'static str = "GetSubscriberHash";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        match &ctx.config.workflow_engine.api_key {
            Some(secret) => Ok(generate_subscriber_hash(&self.user_id.to_string(), secret)),
            None => {
                error!("Unable to sign subscriber hash, the workflow engine api key is not configured");
                Err(UseCaseError::SecretNotConfigured)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn it_signs_subscriber_id_with_api_key() {
        let mut ctx = GatherContext::create_inmemory();
        let user_id = ID::default();

        ctx.config.workflow_engine.api_key = None;
        let res = execute(GetSubscriberHashUseCase { user_id }, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::SecretNotConfigured)));

        ctx.config.workflow_engine.api_key = Some("secret".into());
        let hash = execute(GetSubscriberHashUseCase { user_id }, &ctx)
            .await
            .unwrap();
        assert_eq!(hash, generate_subscriber_hash(&user_id.to_string(), "secret"));
        assert_eq!(hash.len(), 64);
    }
}
