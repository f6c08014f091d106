use super::{IPushService, PushSendError};
use gather_notifier_domain::{PushMessage, PushSubscription};
use std::collections::HashMap;
use std::sync::Mutex;

/// How the fake push service answers for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushBehavior {
    Deliver,
    /// Answers like a push service that no longer knows the subscription
    Gone(u16),
    Fail(u16),
}

/// Push service that records delivered messages instead of calling out.
/// Used when testing.
pub struct InMemoryPushService {
    behaviors: Mutex<HashMap<String, PushBehavior>>,
    attempts: Mutex<Vec<String>>,
    delivered: Mutex<Vec<(String, PushMessage)>>,
}

impl InMemoryPushService {
    pub fn new() -> Self {
        Self {
            behaviors: Mutex::new(HashMap::new()),
            attempts: Mutex::new(vec![]),
            delivered: Mutex::new(vec![]),
        }
    }

    pub fn set_behavior(&self, endpoint: &str, behavior: PushBehavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), behavior);
    }

    /// Endpoints of every send attempt, successful or not
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn delivered(&self) -> Vec<(String, PushMessage)> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Default for InMemoryPushService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushService for InMemoryPushService {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), PushSendError> {
        self.attempts
            .lock()
            .unwrap()
            .push(subscription.endpoint.clone());
        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&subscription.endpoint)
            .copied()
            .unwrap_or(PushBehavior::Deliver);

        match behavior {
            PushBehavior::Deliver => {
                self.delivered
                    .lock()
                    .unwrap()
                    .push((subscription.endpoint.clone(), message.clone()));
                Ok(())
            }
            PushBehavior::Gone(status) | PushBehavior::Fail(status) => {
                Err(PushSendError::from_status(status))
            }
        }
    }
}
