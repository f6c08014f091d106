mod base;
mod invitations;
mod notifications;
mod push;
mod reminders;
mod rsvps;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use invitations::InvitationClient;
pub use invitations::SendInvitationsInput;
use notifications::NotificationClient;
pub use notifications::{DeliverNotificationInput, IdentifySubscriberInput};
use push::PushClient;
pub use push::SubscribePushInput;
use reminders::ReminderClient;
pub use reminders::ScheduleRemindersInput;
use rsvps::RsvpClient;
pub use rsvps::RsvpCreatedInput;
use status::StatusClient;
use std::sync::Arc;

pub use gather_notifier_api_structs::dtos::PushSubscriptionDTO as PushSubscription;
pub use gather_notifier_domain::{
    EventDetails, EventRef, Locale, NotificationEvent, NotificationKind, ID,
};
pub use reqwest::StatusCode;

/// Gather Notifier SDK
///
/// The SDK contains methods for interacting with the Gather notifier
/// server API. Internal routes are authenticated with the api key of the
/// web application, user routes with the session token of a user.
#[derive(Clone)]
pub struct GatherSDK {
    pub invitation: InvitationClient,
    pub notification: NotificationClient,
    pub push: PushClient,
    pub reminder: ReminderClient,
    pub rsvp: RsvpClient,
    pub status: StatusClient,
}

impl GatherSDK {
    /// Client for the internal routes
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    /// Client acting on behalf of the user the token was issued to
    pub fn for_user<T: Into<String>>(address: String, user_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_user_token(user_token.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        Self {
            invitation: InvitationClient::new(base.clone()),
            notification: NotificationClient::new(base.clone()),
            push: PushClient::new(base.clone()),
            reminder: ReminderClient::new(base.clone()),
            rsvp: RsvpClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
