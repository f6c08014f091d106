use gather_notifier_domain::{Locale, ID};
use gather_notifier_infra::GatherContext;
use tracing::{error, warn};

/// The locale to notify a recipient in.
///
/// An explicitly requested locale wins over the one on the recipient's
/// profile. Unsupported or missing locales resolve to the base locale.
pub async fn resolve_recipient_locale(
    ctx: &GatherContext,
    recipient_id: &ID,
    requested: Option<&str>,
) -> Locale {
    if let Some(requested) = requested {
        return parse_or_base_locale(requested);
    }

    match ctx.repos.profiles.find(recipient_id).await {
        Ok(Some(profile)) => match profile.locale.as_deref() {
            Some(locale) => parse_or_base_locale(locale),
            None => Locale::default(),
        },
        Ok(None) => Locale::default(),
        Err(e) => {
            error!(
                "Unable to read profile of: {} to resolve locale. Error: {:?}",
                recipient_id, e
            );
            Locale::default()
        }
    }
}

pub fn parse_or_base_locale(locale: &str) -> Locale {
    match locale.parse::<Locale>() {
        Ok(locale) => locale,
        Err(e) => {
            warn!("{}, falling back to: {}", e, Locale::default());
            Locale::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_domain::Profile;

    #[actix_web::test]
    async fn requested_locale_wins_over_profile() {
        let ctx = GatherContext::create_inmemory();
        let mut profile = Profile::new(ID::default());
        profile.locale = Some("ko".into());
        ctx.repos.profiles.save(&profile).await.unwrap();

        assert_eq!(
            resolve_recipient_locale(&ctx, &profile.user_id, Some("vi-VN")).await,
            Locale::Vi
        );
        assert_eq!(
            resolve_recipient_locale(&ctx, &profile.user_id, None).await,
            Locale::Ko
        );
    }

    #[actix_web::test]
    async fn unknown_locales_fall_back_to_base() {
        let ctx = GatherContext::create_inmemory();
        let mut profile = Profile::new(ID::default());
        profile.locale = Some("fr".into());
        ctx.repos.profiles.save(&profile).await.unwrap();

        assert_eq!(
            resolve_recipient_locale(&ctx, &profile.user_id, None).await,
            Locale::En
        );
        assert_eq!(
            resolve_recipient_locale(&ctx, &ID::default(), None).await,
            Locale::En
        );
        assert_eq!(
            resolve_recipient_locale(&ctx, &ID::default(), Some("de")).await,
            Locale::En
        );
    }
}
