use super::IProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use gather_notifier_domain::{Profile, ID};

pub struct InMemoryProfileRepo {
    profiles: std::sync::Mutex<Vec<Profile>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for InMemoryProfileRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<Profile>> {
        Ok(find(user_id, &self.profiles))
    }

    async fn save(&self, profile: &Profile) -> anyhow::Result<()> {
        upsert_by(
            profile,
            &self.profiles,
            |p| p.user_id == profile.user_id,
            |p| *p = profile.clone(),
        );
        Ok(())
    }
}
