use super::{IPushService, PushSendError};
use crate::config::WebPushConfig;
use gather_notifier_domain::{PushMessage, PushSubscription};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, warn};
use web_push::{
    ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushMessageBuilder,
};

/// Sends VAPID signed and aes128gcm encrypted messages to push services
pub struct VapidPushService {
    client: Client,
    private_key_pem: Option<String>,
    subject: String,
    ttl_secs: u32,
    timeout: Duration,
}

impl VapidPushService {
    pub fn new(config: &WebPushConfig, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            private_key_pem: config.vapid_private_key_pem.clone(),
            subject: config.vapid_subject.clone(),
            ttl_secs: config.ttl_secs,
            timeout,
        }
    }

    fn build_message(
        &self,
        subscription: &PushSubscription,
        payload: &[u8],
    ) -> Result<web_push::WebPushMessage, PushSendError> {
        let private_key_pem = self
            .private_key_pem
            .as_ref()
            .ok_or(PushSendError::NotConfigured)?;
        let info = SubscriptionInfo::new(
            subscription.endpoint.as_str(),
            subscription.p256dh.as_str(),
            subscription.auth.as_str(),
        );

        let mut signature = VapidSignatureBuilder::from_pem(private_key_pem.as_bytes(), &info)
            .map_err(|e| PushSendError::InvalidMessage(e.to_string()))?;
        signature.add_claim("sub", self.subject.as_str());
        let signature = signature
            .build()
            .map_err(|e| PushSendError::InvalidMessage(e.to_string()))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_ttl(self.ttl_secs);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);
        builder.set_vapid_signature(signature);
        builder
            .build()
            .map_err(|e| PushSendError::InvalidMessage(e.to_string()))
    }
}

#[async_trait::async_trait]
impl IPushService for VapidPushService {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), PushSendError> {
        let payload = serde_json::to_vec(message)
            .map_err(|e| PushSendError::InvalidMessage(e.to_string()))?;
        let message = self.build_message(subscription, &payload)?;

        let mut req = self
            .client
            .post(message.endpoint.to_string())
            .header("TTL", message.ttl.to_string());
        if let Some(payload) = message.payload {
            req = req
                .header("Content-Encoding", "aes128gcm")
                .header("Content-Type", "application/octet-stream");
            for (name, value) in payload.crypto_headers {
                req = req.header(name, value);
            }
            req = req.body(payload.content);
        }

        let res = match tokio::time::timeout(self.timeout, req.send()).await {
            Ok(Ok(res)) => res,
            Ok(Err(e)) => {
                error!(
                    "[Network Error] Push service error for subscription: {}. Error message: {:?}",
                    subscription.id, e
                );
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    "[Timeout] Push service did not respond for subscription: {}",
                    subscription.id
                );
                return Err(PushSendError::Timeout(self.timeout.as_millis() as u64));
            }
        };

        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(PushSendError::from_status(status.as_u16()))
        }
    }
}
