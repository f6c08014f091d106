use gather_notifier_domain::{EventDetails, Locale, ID};
use serde::{Deserialize, Serialize};

pub mod rsvp_created {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub attendee_id: ID,
        pub attendee_name: String,
        /// Falls back to the locale of the attendee's profile
        #[serde(default)]
        pub locale: Option<String>,
        #[serde(default)]
        pub organizer_id: Option<ID>,
        /// Number of attendees going, including this one
        pub going_count: u32,
        pub event: EventDetails,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub attendee_locale: Locale,
    }
}
