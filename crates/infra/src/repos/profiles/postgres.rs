use super::IProfileRepo;
use gather_notifier_domain::{Profile, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresProfileRepo {
    pool: PgPool,
}

impl PostgresProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRaw {
    user_uid: Uuid,
    display_name: Option<String>,
    email: Option<String>,
    locale: Option<String>,
}

impl From<ProfileRaw> for Profile {
    fn from(raw: ProfileRaw) -> Self {
        Self {
            user_id: raw.user_uid.into(),
            display_name: raw.display_name,
            email: raw.email,
            locale: raw.locale,
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for PostgresProfileRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<Profile>> {
        let profile: Option<ProfileRaw> = sqlx::query_as(
            r#"
            SELECT user_uid, display_name, email, locale FROM profiles
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile.map(|p| p.into()))
    }

    async fn save(&self, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles(user_uid, display_name, email, locale)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (user_uid) DO UPDATE
            SET display_name = EXCLUDED.display_name,
            email = EXCLUDED.email,
            locale = EXCLUDED.locale
            "#,
        )
        .bind(profile.user_id.inner_ref())
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&profile.locale)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
