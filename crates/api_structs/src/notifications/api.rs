use gather_notifier_domain::{Locale, NotificationEvent, ID};
use serde::{Deserialize, Serialize};

pub mod deliver_notification {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub recipient_id: ID,
        /// Falls back to the locale of the recipient's profile
        #[serde(default)]
        pub locale: Option<String>,
        pub notification: NotificationEvent,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub locale: Locale,
        pub workflow_triggered: bool,
        pub push_sent: usize,
        pub push_failed: usize,
    }
}

pub mod get_subscriber_hash {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscriber_id: String,
        pub subscriber_hash: String,
    }
}

pub mod identify_subscriber {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub subscriber_id: ID,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub display_name: Option<String>,
        #[serde(default)]
        pub locale: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscriber_id: ID,
        pub locale: Locale,
    }
}
