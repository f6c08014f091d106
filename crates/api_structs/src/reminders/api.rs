use gather_notifier_domain::ID;
use serde::{Deserialize, Serialize};

pub mod schedule_event_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub subscriber_id: ID,
        #[serde(default)]
        pub locale: Option<String>,
        pub event_title: String,
        pub event_slug: String,
        /// Timestamp in millis
        pub starts_at: i64,
        /// IANA name of the timezone of the event, defaults to UTC
        #[serde(default)]
        pub timezone: Option<String>,
        #[serde(default)]
        pub location_name: Option<String>,
        #[serde(default)]
        pub google_maps_url: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub scheduled_24h: bool,
        pub scheduled_2h: bool,
    }
}

pub mod cancel_event_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub cancelled: usize,
        pub failed: usize,
    }
}
