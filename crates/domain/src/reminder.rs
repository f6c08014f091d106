use crate::event::EventDetails;
use crate::notification::NotificationEvent;
use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

const HOUR_MILLIS: i64 = 1000 * 60 * 60;

/// The reminders every attendee gets ahead of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderKind {
    /// Asks the attendee to confirm a day before
    #[serde(rename = "24h")]
    Confirm24h,
    /// Final heads up two hours before
    #[serde(rename = "2h")]
    Final2h,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 2] = [ReminderKind::Confirm24h, ReminderKind::Final2h];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm24h => "24h",
            Self::Final2h => "2h",
        }
    }

    /// How long before the start of the event the reminder fires
    pub fn offset_millis(&self) -> i64 {
        match self {
            Self::Confirm24h => 24 * HOUR_MILLIS,
            Self::Final2h => 2 * HOUR_MILLIS,
        }
    }

    pub fn fire_at(&self, starts_at: i64) -> i64 {
        starts_at - self.offset_millis()
    }

    pub fn notification(&self, event: EventDetails) -> NotificationEvent {
        match self {
            Self::Confirm24h => NotificationEvent::ConfirmAttendance24h { event },
            Self::Final2h => NotificationEvent::FinalReminder2h { event },
        }
    }

    /// Handle of a delayed trigger at the workflow engine.
    ///
    /// The workflow engine never accepts a transaction id twice, not even
    /// after it was cancelled, so every scheduling gets a fresh one.
    pub fn transaction_id(&self, event_id: &ID, subscriber_id: &ID, delay_until: i64) -> String {
        format!(
            "reminder:{}:{}:{}:{}:{}",
            event_id,
            subscriber_id,
            self.as_str(),
            delay_until,
            ID::new()
        )
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::Confirm24h),
            "2h" => Ok(Self::Final2h),
            _ => Err(anyhow::Error::msg(format!("Invalid reminder kind: {}", s))),
        }
    }
}

/// A delayed trigger that has been handed to the workflow engine.
///
/// The workflow engine owns firing and retrying it, this is only kept
/// around to be able to cancel it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub event_id: ID,
    pub subscriber_id: ID,
    pub kind: ReminderKind,
    pub transaction_id: String,
    pub delay_until: i64,
}

impl ScheduledReminder {
    pub fn new(event_id: ID, subscriber_id: ID, kind: ReminderKind, starts_at: i64) -> Self {
        let delay_until = kind.fire_at(starts_at);
        Self {
            transaction_id: kind.transaction_id(&event_id, &subscriber_id, delay_until),
            event_id,
            subscriber_id,
            kind,
            delay_until,
        }
    }
}

/// The reminders for an event starting at `starts_at` that are still ahead
/// of `now`. Marks that have already passed are left out.
pub fn plan_reminders(
    event_id: ID,
    subscriber_id: ID,
    starts_at: i64,
    now: i64,
) -> Vec<ScheduledReminder> {
    ReminderKind::ALL
        .iter()
        .filter(|kind| kind.fire_at(starts_at) > now)
        .map(|kind| ScheduledReminder::new(event_id, subscriber_id, *kind, starts_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_plans_both_reminders_for_distant_event() {
        let now = 0;
        let starts_at = 3 * 24 * HOUR_MILLIS;
        let reminders = plan_reminders(ID::default(), ID::default(), starts_at, now);
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].delay_until, 2 * 24 * HOUR_MILLIS);
        assert_eq!(reminders[1].delay_until, starts_at - 2 * HOUR_MILLIS);
    }

    #[test]
    fn it_skips_reminders_in_the_past() {
        let now = 1_700_000_000_000;
        let reminders = plan_reminders(ID::default(), ID::default(), now + 10 * HOUR_MILLIS, now);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].kind, ReminderKind::Final2h);

        let reminders = plan_reminders(ID::default(), ID::default(), now + HOUR_MILLIS, now);
        assert!(reminders.is_empty());
    }

    #[test]
    fn mark_exactly_now_is_skipped() {
        let now = 1_700_000_000_000;
        let reminders = plan_reminders(ID::default(), ID::default(), now + 2 * HOUR_MILLIS, now);
        assert!(reminders.is_empty());
    }

    #[test]
    fn it_builds_transaction_ids() {
        let event_id = ID::default();
        let subscriber_id = ID::default();
        let starts_at = 2 * 24 * HOUR_MILLIS;
        let reminder =
            ScheduledReminder::new(event_id, subscriber_id, ReminderKind::Confirm24h, starts_at);
        assert!(reminder.transaction_id.starts_with(&format!(
            "reminder:{}:{}:24h:{}:",
            event_id,
            subscriber_id,
            24 * HOUR_MILLIS
        )));

        let again =
            ScheduledReminder::new(event_id, subscriber_id, ReminderKind::Confirm24h, starts_at);
        assert_eq!(again.delay_until, reminder.delay_until);
        assert_ne!(again.transaction_id, reminder.transaction_id);
        assert_eq!("2h".parse::<ReminderKind>().unwrap(), ReminderKind::Final2h);
        assert!("1h".parse::<ReminderKind>().is_err());
    }
}
