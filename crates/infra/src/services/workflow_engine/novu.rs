use super::{IWorkflowEngine, SubscriberAttributes, TriggerRequest, WorkflowEngineError};
use chrono::{LocalResult, TimeZone, Utc};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::error;

/// Client of the Novu REST api
pub struct NovuRestApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyBody<'a> {
    subscriber_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    locale: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerBody<'a> {
    name: &'a str,
    to: TriggerRecipient<'a>,
    payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRecipient<'a> {
    subscriber_id: &'a str,
}

fn to_rfc3339(timestamp_millis: i64) -> Option<String> {
    match Utc.timestamp_millis_opt(timestamp_millis) {
        LocalResult::Single(dt) => Some(dt.to_rfc3339()),
        _ => None,
    }
}

impl NovuRestApi {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<(), WorkflowEngineError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            error!("[Configuration Error] Novu api key is missing");
            WorkflowEngineError::MissingApiKey
        })?;

        let mut req = self
            .client
            .request(method.clone(), format!("{}/{}", self.base_url, path))
            .header("authorization", format!("ApiKey {}", api_key));
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = match tokio::time::timeout(self.timeout, req.send()).await {
            Ok(Ok(res)) => res,
            Ok(Err(e)) => {
                error!(
                    "[Network Error] Novu API {} {} error. Error message: {:?}",
                    method, path, e
                );
                return Err(e.into());
            }
            Err(_) => {
                error!("[Timeout] Novu API {} {} timed out", method, path);
                return Err(WorkflowEngineError::Timeout(self.timeout.as_millis() as u64));
            }
        };

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        let body = res.text().await.unwrap_or_default();
        error!(
            "[Unexpected Response] Novu API {} {} responded with status: {}. Body: {}",
            method, path, status, body
        );
        Err(WorkflowEngineError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait::async_trait]
impl IWorkflowEngine for NovuRestApi {
    async fn identify(
        &self,
        subscriber_id: &str,
        attributes: &SubscriberAttributes,
    ) -> Result<(), WorkflowEngineError> {
        let body = IdentifyBody {
            subscriber_id,
            email: attributes.email.as_deref(),
            first_name: attributes.first_name.as_deref(),
            locale: attributes.locale.as_str(),
        };
        self.send(Method::POST, "v1/subscribers", Some(&body)).await
    }

    async fn trigger(&self, request: &TriggerRequest) -> Result<(), WorkflowEngineError> {
        let mut payload = request.payload.clone();
        // The delay step of the workflows reads its target time from the payload
        if let (Some(delay_till), Value::Object(map)) = (request.delay_till, &mut payload) {
            if let Some(delay_till) = to_rfc3339(delay_till) {
                map.insert("delayTill".into(), json!(delay_till));
            }
        }
        let body = TriggerBody {
            name: &request.workflow_key,
            to: TriggerRecipient {
                subscriber_id: &request.subscriber_id,
            },
            payload,
            transaction_id: request.transaction_id.as_deref(),
        };
        self.send(Method::POST, "v1/events/trigger", Some(&body))
            .await
    }

    async fn cancel(&self, transaction_id: &str) -> Result<(), WorkflowEngineError> {
        self.send(
            Method::DELETE,
            &format!("v1/events/trigger/{}", transaction_id),
            None::<&()>,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_notifier_domain::Locale;

    #[tokio::test]
    async fn it_fails_with_configuration_error_without_api_key() {
        let api = NovuRestApi::new(
            "http://localhost:1".into(),
            None,
            Duration::from_millis(100),
        );
        let res = api
            .trigger(&TriggerRequest::new("rsvp", "user".into(), json!({})))
            .await;
        assert!(matches!(res, Err(WorkflowEngineError::MissingApiKey)));

        let res = api
            .identify(
                "user",
                &SubscriberAttributes {
                    email: None,
                    first_name: None,
                    locale: Locale::Vi,
                },
            )
            .await;
        assert!(matches!(res, Err(WorkflowEngineError::MissingApiKey)));
    }

    #[test]
    fn it_formats_delay_as_rfc3339() {
        assert_eq!(
            to_rfc3339(1710590400000).as_deref(),
            Some("2024-03-16T12:00:00+00:00")
        );
    }
}
