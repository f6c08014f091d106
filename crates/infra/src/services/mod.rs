mod push_service;
mod workflow_engine;

pub use push_service::{
    IPushService, InMemoryPushService, PushBehavior, PushSendError, VapidPushService,
};
pub use workflow_engine::{
    IWorkflowEngine, InMemoryWorkflowEngine, NovuRestApi, RecordedWorkflowCall,
    SubscriberAttributes, TriggerRequest, WorkflowEngineError,
};
