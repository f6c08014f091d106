use gather_notifier_domain::{InviteQuota, QuotaCheck, ID};
use gather_notifier_infra::{GatherContext, QuotaReservation};

/// Whether the user can send `requested` more invitations right now.
/// Nothing is counted, use `reserve_quota` before sending.
pub async fn check_quota(
    ctx: &GatherContext,
    user_id: &ID,
    requested: u32,
) -> anyhow::Result<QuotaCheck> {
    let quota = ctx
        .repos
        .invite_quotas
        .find(user_id)
        .await?
        .unwrap_or_else(|| InviteQuota::new(*user_id));
    let now = ctx.sys.get_timestamp_millis();

    Ok(quota.check(requested, &ctx.config.invite_limits, now))
}

/// Checks and counts `requested` invitations in one atomic step.
///
/// Must be followed by `release_quota` with the number of reserved
/// invitations that were not delivered.
pub async fn reserve_quota(
    ctx: &GatherContext,
    user_id: &ID,
    requested: u32,
) -> anyhow::Result<QuotaReservation> {
    let now = ctx.sys.get_timestamp_millis();
    ctx.repos
        .invite_quotas
        .reserve(user_id, requested, &ctx.config.invite_limits, now)
        .await
}

pub async fn release_quota(
    ctx: &GatherContext,
    user_id: &ID,
    unsent: u32,
) -> anyhow::Result<InviteQuota> {
    let now = ctx.sys.get_timestamp_millis();
    ctx.repos.invite_quotas.release(user_id, unsent, now).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_domain::{QuotaExceededReason, QuotaLimits, DAY_MILLIS};

    #[actix_web::test]
    async fn it_blocks_once_daily_quota_is_used() {
        let (mut ctx, handles) = GatherContext::create_inmemory_with_handles();
        ctx.config.invite_limits = QuotaLimits {
            daily: 3,
            weekly: 10,
        };
        let user_id = ID::default();

        assert!(check_quota(&ctx, &user_id, 3).await.unwrap().allowed);
        let res = reserve_quota(&ctx, &user_id, 3).await.unwrap();
        assert!(res.check.allowed);

        let check = check_quota(&ctx, &user_id, 1).await.unwrap();
        assert!(!check.allowed);
        assert_eq!(check.reason, Some(QuotaExceededReason::DailyLimitReached));

        handles.sys.advance(DAY_MILLIS);
        let check = check_quota(&ctx, &user_id, 1).await.unwrap();
        assert!(check.allowed);
        assert_eq!(check.remaining_daily, 3);
        assert_eq!(check.remaining_weekly, 7);
    }

    #[actix_web::test]
    async fn released_invitations_are_available_again() {
        let (mut ctx, _) = GatherContext::create_inmemory_with_handles();
        ctx.config.invite_limits = QuotaLimits {
            daily: 3,
            weekly: 10,
        };
        let user_id = ID::default();

        assert!(reserve_quota(&ctx, &user_id, 3).await.unwrap().check.allowed);
        let quota = release_quota(&ctx, &user_id, 2).await.unwrap();
        let now = ctx.sys.get_timestamp_millis();
        assert_eq!(quota.remaining(&ctx.config.invite_limits, now), (2, 9));
        assert!(check_quota(&ctx, &user_id, 2).await.unwrap().allowed);
    }
}
