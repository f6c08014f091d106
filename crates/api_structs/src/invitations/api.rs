use gather_notifier_domain::{EventDetails, ID};
use serde::{Deserialize, Serialize};

pub mod get_invite_quota {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub remaining_daily: u32,
        pub remaining_weekly: u32,
        pub daily_limit: u32,
        pub weekly_limit: u32,
    }
}

pub mod send_invitations {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event: EventDetails,
        pub invitees: Vec<ID>,
        /// Falls back to the display name on the inviter's profile
        #[serde(default)]
        pub inviter_name: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub sent: u32,
        pub failed: u32,
        pub remaining_daily: u32,
        pub remaining_weekly: u32,
    }
}
