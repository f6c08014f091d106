mod inmemory;
mod postgres;

use gather_notifier_domain::{Profile, ID};
pub use inmemory::InMemoryProfileRepo;
pub use postgres::PostgresProfileRepo;

#[async_trait::async_trait]
pub trait IProfileRepo: Send + Sync {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<Profile>>;
    async fn save(&self, profile: &Profile) -> anyhow::Result<()>;
}
