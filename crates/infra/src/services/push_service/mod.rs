mod inmemory;
mod vapid;

use gather_notifier_domain::{PushMessage, PushSubscription};
pub use inmemory::{InMemoryPushService, PushBehavior};
use thiserror::Error;
pub use vapid::VapidPushService;

#[derive(Error, Debug)]
pub enum PushSendError {
    /// The push service no longer knows the subscription, it should be removed
    #[error("The push subscription has expired")]
    SubscriptionExpired,
    #[error("No VAPID key is configured")]
    NotConfigured,
    #[error("Unable to build push message: {0}")]
    InvalidMessage(String),
    #[error("The push service rejected the message with status {0}")]
    Rejected(u16),
    #[error("The push service did not respond within {0} millis")]
    Timeout(u64),
    #[error("Unable to reach the push service: {0}")]
    Network(#[from] reqwest::Error),
}

impl PushSendError {
    pub fn is_subscription_expired(&self) -> bool {
        matches!(self, Self::SubscriptionExpired)
    }

    /// Status codes with which push services tell that a subscription is gone
    pub fn from_status(status: u16) -> Self {
        match status {
            404 | 410 => Self::SubscriptionExpired,
            status => Self::Rejected(status),
        }
    }
}

/// Delivers a message to one browser push subscription
#[async_trait::async_trait]
pub trait IPushService: Send + Sync {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), PushSendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_classifies_gone_subscriptions_as_expired() {
        assert!(PushSendError::from_status(404).is_subscription_expired());
        assert!(PushSendError::from_status(410).is_subscription_expired());
        assert!(!PushSendError::from_status(500).is_subscription_expired());
        assert!(!PushSendError::from_status(429).is_subscription_expired());
    }
}
