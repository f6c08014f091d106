use crate::error::GatherError;
use crate::invitations::quota_guard::check_quota;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use gather_notifier_api_structs::get_invite_quota::*;
use gather_notifier_domain::{QuotaLimits, ID};
use gather_notifier_infra::GatherContext;

pub async fn get_invite_quota_controller(
    http_req: HttpRequest,
    ctx: web::Data<GatherContext>,
) -> Result<HttpResponse, GatherError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetInviteQuotaUseCase {
        user_id: user.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                remaining_daily: res.remaining_daily,
                remaining_weekly: res.remaining_weekly,
                daily_limit: res.limits.daily,
                weekly_limit: res.limits.weekly,
            })
        })
        .map_err(GatherError::from)
}

#[derive(Debug)]
pub struct GetInviteQuotaUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub remaining_daily: u32,
    pub remaining_weekly: u32,
    pub limits: QuotaLimits,
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
impl UseCase for GetInviteQuotaUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetInviteQuota";

    async fn execute(&mut self, ctx: &GatherContext) -> Result<Self::Response, Self::Error> {
        let check = check_quota(ctx, &self.user_id, 0)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            remaining_daily: check.remaining_daily,
            remaining_weekly: check.remaining_weekly,
            limits: ctx.config.invite_limits,
        })
    }
}
