mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, WebPushConfig, WorkflowEngineConfig};
pub use repos::{
    DeleteResult, IInviteQuotaRepo, IProfileRepo, IPushSubscriptionRepo,
    IScheduledReminderRepo, QuotaReservation, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::warn;

/// The external services notifications are delivered through
#[derive(Clone)]
pub struct Services {
    pub workflow_engine: Arc<dyn IWorkflowEngine>,
    pub push: Arc<dyn IPushService>,
}

impl Services {
    pub fn create(config: &Config) -> Self {
        Self {
            workflow_engine: Arc::new(NovuRestApi::new(
                config.workflow_engine.api_url.clone(),
                config.workflow_engine.api_key.clone(),
                config.outbound_timeout(),
            )),
            push: Arc::new(VapidPushService::new(
                &config.web_push,
                config.outbound_timeout(),
            )),
        }
    }
}

#[derive(Clone)]
pub struct GatherContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

/// Handles to the fakes of an inmemory `GatherContext` so that tests can
/// inspect and steer them
#[derive(Clone)]
pub struct InMemoryHandles {
    pub workflow_engine: Arc<InMemoryWorkflowEngine>,
    pub push: Arc<InMemoryPushService>,
    pub sys: Arc<StaticTimeSys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl GatherContext {
    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            services: Services::create(&config),
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create_inmemory_with_handles().0
    }

    pub fn create_inmemory_with_handles() -> (Self, InMemoryHandles) {
        let handles = InMemoryHandles {
            workflow_engine: Arc::new(InMemoryWorkflowEngine::new()),
            push: Arc::new(InMemoryPushService::new()),
            sys: Arc::new(StaticTimeSys::new(
                RealSys {}.get_timestamp_millis(),
            )),
        };
        let ctx = Self {
            repos: Repos::create_inmemory(),
            services: Services {
                workflow_engine: handles.workflow_engine.clone(),
                push: handles.push.clone(),
            },
            config: Config::new(),
            sys: handles.sys.clone(),
        };
        (ctx, handles)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> GatherContext {
    match std::env::var("DATABASE_URL") {
        Ok(postgres_connection_string) => {
            GatherContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        Err(_) => {
            warn!("Did not find DATABASE_URL environment variable. Falling back to inmemory repositories, nothing will be persisted.");
            let config = Config::new();
            GatherContext {
                repos: Repos::create_inmemory(),
                services: Services::create(&config),
                config,
                sys: Arc::new(RealSys {}),
            }
        }
    }
}
