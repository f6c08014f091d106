use crate::error::GatherError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::identify_subscriber::*;
use gather_notifier_domain::{Locale, Profile, ID};
use gather_notifier_infra::{GatherContext, SubscriberAttributes};
use tracing::warn;

pub async fn identify_subscriber_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    protect_internal_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = IdentifySubscriberUseCase {
        subscriber_id: body.subscriber_id,
        email: body.email,
        display_name: body.display_name,
        locale: body.locale,
    };

    execute(usecase, &ctx)
        .await
        .map(|profile| {
            HttpResponse::Ok().json(APIResponse {
                subscriber_id: profile.user_id,
                locale: profile.resolved_locale(),
            })
        })
        .map_err(GatherError::from)
}

/// Keeps the profile mirror and the subscriber at the workflow engine in
/// sync with the user's profile in the application.
///
/// Fields that are not given keep their previous value.
#[derive(Debug)]
pub struct IdentifySubscriberUseCase {
    pub subscriber_id: ID,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    WorkflowEngine(String),
}

impl From<UseCaseError> for GatherError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::WorkflowEngine(e) => Self::BadGateway(e),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for IdentifySubscriberUseCase {
    type Response = Profile;
    type Error = UseCaseError;

    const NAME: &'static str = "IdentifySubscriber";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        let mut profile = ctx
            .repos
            .profiles
            .find(&self.subscriber_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .unwrap_or_else(|| Profile::new(self.subscriber_id));

        if let Some(email) = self.email.take() {
            profile.email = Some(email);
        }
        if let Some(display_name) = self.display_name.take() {
            profile.display_name = Some(display_name);
        }
        if let Some(locale) = self.locale.take() {
            profile.locale = Some(locale);
        }
        if !profile.has_supported_locale() {
            warn!(
                "Profile of: {} has unsupported locale: {:?}, notifications will use: {}",
                profile.user_id,
                profile.locale,
                Locale::default()
            );
        }

        ctx.repos
            .profiles
            .save(&profile)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let attributes = SubscriberAttributes {
            email: profile.email.clone(),
            first_name: profile.first_name().map(String::from),
            locale: profile.resolved_locale(),
        };
        ctx.services
            .workflow_engine
            .identify(&profile.user_id.to_string(), &attributes)
            .await
            .map_err(|e| UseCaseError::WorkflowEngine(e.to_string()))?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_infra::RecordedWorkflowCall;

    #[actix_web::test]
    async fn it_mirrors_profile_and_identifies_subscriber() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        let subscriber_id = ID::default();

        let profile = execute(
            IdentifySubscriberUseCase {
                subscriber_id,
                email: Some("linh@gather.test".into()),
                display_name: Some("Linh Tran".into()),
                locale: Some("vi-VN".into()),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(profile.resolved_locale(), Locale::Vi);

        let profile = execute(
            IdentifySubscriberUseCase {
                subscriber_id,
                email: None,
                display_name: None,
                locale: Some("ko".into()),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(profile.email.as_deref(), Some("linh@gather.test"));

        let stored = ctx.repos.profiles.find(&subscriber_id).await.unwrap();
        assert_eq!(stored, Some(profile));

        let calls = handles.workflow_engine.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            RecordedWorkflowCall::Identify {
                subscriber_id: id,
                attributes,
            } => {
                assert_eq!(id, &subscriber_id.to_string());
                assert_eq!(attributes.first_name.as_deref(), Some("Linh"));
                assert_eq!(attributes.locale, Locale::Ko);
            }
            other => panic!("Expected identify call, got: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn it_reports_failing_workflow_engine() {
        let (ctx, handles) = GatherContext::create_inmemory_with_handles();
        handles.workflow_engine.set_failing(true);

        let res = execute(
            IdentifySubscriberUseCase {
                subscriber_id: ID::default(),
                email: None,
                display_name: None,
                locale: None,
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::WorkflowEngine(_))));
    }
}
