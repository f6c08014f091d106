mod inmemory;
mod novu;

use gather_notifier_domain::Locale;
pub use inmemory::{InMemoryWorkflowEngine, RecordedWorkflowCall};
pub use novu::NovuRestApi;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowEngineError {
    #[error("The workflow engine api key is not configured")]
    MissingApiKey,
    #[error("The workflow engine did not respond within {0} millis")]
    Timeout(u64),
    #[error("The workflow engine rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Unable to reach the workflow engine: {0}")]
    Network(#[from] reqwest::Error),
}

/// Profile of a subscriber as known to the workflow engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberAttributes {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerRequest {
    pub workflow_key: String,
    pub subscriber_id: String,
    pub payload: Value,
    /// Timestamp in millis the workflow should wait for before delivering
    pub delay_till: Option<i64>,
    /// Handle that can later be used to cancel the triggered workflow
    pub transaction_id: Option<String>,
}

impl TriggerRequest {
    pub fn new(workflow_key: &str, subscriber_id: String, payload: Value) -> Self {
        Self {
            workflow_key: workflow_key.to_string(),
            subscriber_id,
            payload,
            delay_till: None,
            transaction_id: None,
        }
    }

    pub fn delayed(mut self, delay_till: i64, transaction_id: String) -> Self {
        self.delay_till = Some(delay_till);
        self.transaction_id = Some(transaction_id);
        self
    }
}

/// Third party service that owns in-app inbox and email delivery, and
/// delayed workflows.
#[async_trait::async_trait]
pub trait IWorkflowEngine: Send + Sync {
    async fn identify(
        &self,
        subscriber_id: &str,
        attributes: &SubscriberAttributes,
    ) -> Result<(), WorkflowEngineError>;
    async fn trigger(&self, request: &TriggerRequest) -> Result<(), WorkflowEngineError>;
    async fn cancel(&self, transaction_id: &str) -> Result<(), WorkflowEngineError>;
}
