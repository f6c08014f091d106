use super::{IInviteQuotaRepo, QuotaReservation};
use gather_notifier_domain::{InviteQuota, QuotaLimits, ID};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryInviteQuotaRepo {
    quotas: Mutex<HashMap<ID, InviteQuota>>,
}

impl InMemoryInviteQuotaRepo {
    pub fn new() -> Self {
        Self {
            quotas: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IInviteQuotaRepo for InMemoryInviteQuotaRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<InviteQuota>> {
        Ok(self.quotas.lock().unwrap().get(user_id).cloned())
    }

    async fn reserve(
        &self,
        user_id: &ID,
        requested: u32,
        limits: &QuotaLimits,
        now: i64,
    ) -> anyhow::Result<QuotaReservation> {
        let mut quotas = self.quotas.lock().unwrap();
        let quota = quotas
            .entry(*user_id)
            .or_insert_with(|| InviteQuota::new(*user_id));
        let check = quota.reserve(requested, limits, now);

        Ok(QuotaReservation {
            check,
            quota: quota.clone(),
        })
    }

    async fn release(&self, user_id: &ID, count: u32, now: i64) -> anyhow::Result<InviteQuota> {
        let mut quotas = self.quotas.lock().unwrap();
        let quota = quotas
            .entry(*user_id)
            .or_insert_with(|| InviteQuota::new(*user_id));
        quota.release(count, now);
        Ok(quota.clone())
    }
}
