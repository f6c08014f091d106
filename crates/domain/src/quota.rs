use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;
pub const WEEK_MILLIS: i64 = DAY_MILLIS * 7;

/// Caps on how many invitations a user can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub daily: u32,
    pub weekly: u32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            daily: 20,
            weekly: 100,
        }
    }
}

/// Invitation counters of a `User`.
///
/// A window starts at the first send after the previous window of the same
/// length has elapsed, and its counter restarts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteQuota {
    pub user_id: ID,
    pub daily_count: u32,
    pub daily_window_start: Option<i64>,
    pub weekly_count: u32,
    pub weekly_window_start: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotaExceededReason {
    DailyLimitReached,
    WeeklyLimitReached,
}

impl Display for QuotaExceededReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DailyLimitReached => write!(f, "Daily invitation limit reached"),
            Self::WeeklyLimitReached => write!(f, "Weekly invitation limit reached"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaCheck {
    pub allowed: bool,
    pub reason: Option<QuotaExceededReason>,
    pub remaining_daily: u32,
    pub remaining_weekly: u32,
}

impl QuotaCheck {
    /// How many sends the check actually grants
    pub fn allowance(&self) -> u32 {
        if self.allowed {
            self.remaining_daily.min(self.remaining_weekly)
        } else {
            0
        }
    }
}

fn window_elapsed(start: Option<i64>, length: i64, now: i64) -> bool {
    match start {
        Some(start) => now >= start + length,
        None => true,
    }
}

impl InviteQuota {
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            daily_count: 0,
            daily_window_start: None,
            weekly_count: 0,
            weekly_window_start: None,
        }
    }

    /// Counters as they are at `now`, with elapsed windows reset
    pub fn current(&self, now: i64) -> Self {
        let mut quota = self.clone();
        if window_elapsed(quota.daily_window_start, DAY_MILLIS, now) {
            quota.daily_count = 0;
            quota.daily_window_start = None;
        }
        if window_elapsed(quota.weekly_window_start, WEEK_MILLIS, now) {
            quota.weekly_count = 0;
            quota.weekly_window_start = None;
        }
        quota
    }

    pub fn remaining(&self, limits: &QuotaLimits, now: i64) -> (u32, u32) {
        let quota = self.current(now);
        (
            limits.daily.saturating_sub(quota.daily_count),
            limits.weekly.saturating_sub(quota.weekly_count),
        )
    }

    pub fn check(&self, requested: u32, limits: &QuotaLimits, now: i64) -> QuotaCheck {
        let (remaining_daily, remaining_weekly) = self.remaining(limits, now);
        let reason = if requested > remaining_daily {
            Some(QuotaExceededReason::DailyLimitReached)
        } else if requested > remaining_weekly {
            Some(QuotaExceededReason::WeeklyLimitReached)
        } else {
            None
        };

        QuotaCheck {
            allowed: reason.is_none(),
            reason,
            remaining_daily,
            remaining_weekly,
        }
    }

    /// Adds `count` sends, never going beyond the limits.
    ///
    /// Returns how many sends were actually counted.
    pub fn increment(&mut self, count: u32, limits: &QuotaLimits, now: i64) -> u32 {
        *self = self.current(now);
        let (remaining_daily, remaining_weekly) = self.remaining(limits, now);
        let applied = count.min(remaining_daily).min(remaining_weekly);
        if applied == 0 {
            return 0;
        }

        if self.daily_window_start.is_none() {
            self.daily_window_start = Some(now);
        }
        if self.weekly_window_start.is_none() {
            self.weekly_window_start = Some(now);
        }
        self.daily_count += applied;
        self.weekly_count += applied;
        applied
    }

    /// Checks and counts `requested` sends in one step. Nothing is counted
    /// when the check fails.
    pub fn reserve(&mut self, requested: u32, limits: &QuotaLimits, now: i64) -> QuotaCheck {
        *self = self.current(now);
        let check = self.check(requested, limits, now);
        let reserved = requested.min(check.allowance());
        self.increment(reserved, limits, now);
        check
    }

    /// Gives back `count` reserved sends that never went out
    pub fn release(&mut self, count: u32, now: i64) {
        *self = self.current(now);
        if self.daily_window_start.is_some() {
            self.daily_count = self.daily_count.saturating_sub(count);
        }
        if self.weekly_window_start.is_some() {
            self.weekly_count = self.weekly_count.saturating_sub(count);
        }
    }
}
