use gather_notifier_domain::QuotaLimits;
use gather_notifier_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Base url of the web application, used for links in notifications
    pub app_base_url: String,
    /// Key the web application uses to call the internal routes
    pub internal_api_key: String,
    /// Secret the web application signs user session tokens with
    pub auth_jwt_secret: String,
    pub workflow_engine: WorkflowEngineConfig,
    pub web_push: WebPushConfig,
    pub invite_limits: QuotaLimits,
    /// Upper bound in millis for every call to an external service
    pub outbound_timeout_millis: u64,
}

#[derive(Debug, Clone)]
pub struct WorkflowEngineConfig {
    pub api_url: String,
    /// When missing every call to the workflow engine fails with a
    /// configuration error
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WebPushConfig {
    /// PEM encoded EC private key of the VAPID key pair
    pub vapid_private_key_pem: Option<String>,
    /// Contact of the sender, `mailto:` or `https:` url
    pub vapid_subject: String,
    /// How long the push service should hold on to undelivered messages
    pub ttl_secs: u32,
}

fn parse_env_or<T: FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) => value,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Falling back to: {}",
                name, default
            );
            default.to_string()
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let internal_api_key = match std::env::var("INTERNAL_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find INTERNAL_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Internal api key was generated and set to: {}", key);
                key
            }
        };
        let auth_jwt_secret = match std::env::var("AUTH_JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!("Did not find AUTH_JWT_SECRET environment variable. Going to create one, user tokens issued by the application will be rejected.");
                create_random_secret(32)
            }
        };
        let api_key = std::env::var("NOVU_API_KEY").ok();
        if api_key.is_none() {
            warn!("Did not find NOVU_API_KEY environment variable. In-app and email notifications will fail.");
        }
        let vapid_private_key_pem = std::env::var("VAPID_PRIVATE_KEY_PEM").ok();
        if vapid_private_key_pem.is_none() {
            warn!("Did not find VAPID_PRIVATE_KEY_PEM environment variable. Push notifications will fail.");
        }

        let default_limits = QuotaLimits::default();

        Self {
            port: parse_env_or("PORT", 5000),
            app_base_url: env_or("APP_BASE_URL", "http://localhost:3000"),
            internal_api_key,
            auth_jwt_secret,
            workflow_engine: WorkflowEngineConfig {
                api_url: env_or("NOVU_API_URL", "https://api.novu.co"),
                api_key,
            },
            web_push: WebPushConfig {
                vapid_private_key_pem,
                vapid_subject: env_or("VAPID_SUBJECT", "mailto:hello@gather.test"),
                ttl_secs: parse_env_or("PUSH_TTL_SECS", 60 * 60 * 24),
            },
            invite_limits: QuotaLimits {
                daily: parse_env_or("INVITE_DAILY_LIMIT", default_limits.daily),
                weekly: parse_env_or("INVITE_WEEKLY_LIMIT", default_limits.weekly),
            },
            outbound_timeout_millis: parse_env_or("OUTBOUND_TIMEOUT_MS", 10_000),
        }
    }

    pub fn outbound_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.outbound_timeout_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
