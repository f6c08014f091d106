use gather_notifier_api::Application;
use gather_notifier_domain::{QuotaLimits, ID};
use gather_notifier_infra::{Config, GatherContext, InMemoryHandles};
use gather_notifier_sdk::GatherSDK;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

pub const TEST_WORKFLOW_API_KEY: &str = "test-workflow-api-key";

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub handles: InMemoryHandles,
}

#[derive(Serialize)]
struct Claims {
    exp: usize,
    sub: String,
}

impl TestApp {
    /// Client for the internal routes of the web application
    pub fn internal_sdk(&self) -> GatherSDK {
        GatherSDK::new(self.address.clone(), self.config.internal_api_key.clone())
    }

    /// Client signed in as the given user
    pub fn user_sdk(&self, user_id: &ID) -> GatherSDK {
        let claims = Claims {
            exp: 5609418990, // year 2147
            sub: user_id.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth_jwt_secret.as_bytes()),
        )
        .expect("To encode user token");
        GatherSDK::for_user(self.address.clone(), token)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let (mut ctx, handles) = GatherContext::create_inmemory_with_handles();
    ctx.config.port = 0; // Random port
    ctx.config.workflow_engine.api_key = Some(TEST_WORKFLOW_API_KEY.into());
    ctx.config.invite_limits = QuotaLimits {
        daily: 3,
        weekly: 10,
    };

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        config,
        address,
        handles,
    }
}
