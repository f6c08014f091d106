mod inmemory;
mod postgres;

use gather_notifier_domain::{InviteQuota, QuotaCheck, QuotaLimits, ID};
pub use inmemory::InMemoryInviteQuotaRepo;
pub use postgres::PostgresInviteQuotaRepo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaReservation {
    pub check: QuotaCheck,
    /// Counters after the reservation
    pub quota: InviteQuota,
}

#[async_trait::async_trait]
pub trait IInviteQuotaRepo: Send + Sync {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<InviteQuota>>;
    /// Checks and counts `requested` sends as one atomic operation. Nothing
    /// is counted when the check fails, and concurrent reservations for the
    /// same user are serialized.
    async fn reserve(
        &self,
        user_id: &ID,
        requested: u32,
        limits: &QuotaLimits,
        now: i64,
    ) -> anyhow::Result<QuotaReservation>;
    /// Gives back `count` reserved sends that were never delivered
    async fn release(&self, user_id: &ID, count: u32, now: i64) -> anyhow::Result<InviteQuota>;
}
