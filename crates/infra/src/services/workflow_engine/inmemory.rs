use super::{IWorkflowEngine, SubscriberAttributes, TriggerRequest, WorkflowEngineError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedWorkflowCall {
    Identify {
        subscriber_id: String,
        attributes: SubscriberAttributes,
    },
    Trigger(TriggerRequest),
    Cancel {
        transaction_id: String,
    },
}

/// Workflow engine that records the calls it receives instead of calling
/// out. Used when testing.
///
/// Like the real engine it rejects a trigger whose transaction id has been
/// used before, even when that trigger was cancelled.
pub struct InMemoryWorkflowEngine {
    calls: Mutex<Vec<RecordedWorkflowCall>>,
    transaction_ids: Mutex<HashSet<String>>,
    failing: AtomicBool,
    failing_cancel: AtomicBool,
}

impl InMemoryWorkflowEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            transaction_ids: Mutex::new(HashSet::new()),
            failing: AtomicBool::new(false),
            failing_cancel: AtomicBool::new(false),
        }
    }

    /// When failing every call is rejected, and not recorded
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Like `set_failing`, but only for cancels
    pub fn set_failing_cancel(&self, failing: bool) {
        self.failing_cancel.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RecordedWorkflowCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn triggers(&self) -> Vec<TriggerRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedWorkflowCall::Trigger(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    pub fn cancelled(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedWorkflowCall::Cancel { transaction_id } => Some(transaction_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RecordedWorkflowCall) -> Result<(), WorkflowEngineError> {
        let failing = match call {
            RecordedWorkflowCall::Cancel { .. } => {
                self.failing.load(Ordering::SeqCst) || self.failing_cancel.load(Ordering::SeqCst)
            }
            _ => self.failing.load(Ordering::SeqCst),
        };
        if failing {
            return Err(WorkflowEngineError::Rejected {
                status: 503,
                body: "Service unavailable".into(),
            });
        }

        if let RecordedWorkflowCall::Trigger(TriggerRequest {
            transaction_id: Some(transaction_id),
            ..
        }) = &call
        {
            if !self
                .transaction_ids
                .lock()
                .unwrap()
                .insert(transaction_id.clone())
            {
                return Err(WorkflowEngineError::Rejected {
                    status: 409,
                    body: format!("Transaction id: {} already used", transaction_id),
                });
            }
        }

        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl Default for InMemoryWorkflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IWorkflowEngine for InMemoryWorkflowEngine {
    async fn identify(
        &self,
        subscriber_id: &str,
        attributes: &SubscriberAttributes,
    ) -> Result<(), WorkflowEngineError> {
        self.record(RecordedWorkflowCall::Identify {
            subscriber_id: subscriber_id.to_string(),
            attributes: attributes.clone(),
        })
    }

    async fn trigger(&self, request: &TriggerRequest) -> Result<(), WorkflowEngineError> {
        self.record(RecordedWorkflowCall::Trigger(request.clone()))
    }

    async fn cancel(&self, transaction_id: &str) -> Result<(), WorkflowEngineError> {
        self.record(RecordedWorkflowCall::Cancel {
            transaction_id: transaction_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn it_rejects_reused_transaction_ids() {
        let engine = InMemoryWorkflowEngine::new();
        let trigger = TriggerRequest::new("2h-reminder", "subscriber".into(), json!({}))
            .delayed(1000, "reminder:1".into());

        assert!(engine.trigger(&trigger).await.is_ok());
        assert!(engine.cancel("reminder:1").await.is_ok());
        assert!(matches!(
            engine.trigger(&trigger).await,
            Err(WorkflowEngineError::Rejected { status: 409, .. })
        ));
        assert_eq!(engine.triggers().len(), 1);
    }

    #[tokio::test]
    async fn cancels_can_fail_on_their_own() {
        let engine = InMemoryWorkflowEngine::new();
        engine.set_failing_cancel(true);
        let trigger = TriggerRequest::new("2h-reminder", "subscriber".into(), json!({}));

        assert!(engine.trigger(&trigger).await.is_ok());
        assert!(engine.cancel("reminder:1").await.is_err());
        assert!(engine.cancelled().is_empty());
    }
}
