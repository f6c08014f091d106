use crate::notification::NotificationKind;
use crate::shared::entity::{Entity, ID};
use crate::templates::RenderedPayload;
use serde::{Deserialize, Serialize};

/// A browser issued Web Push endpoint for one device of a `User`.
///
/// A user can have many of these, but at most one per `endpoint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub id: ID,
    pub user_id: ID,
    pub endpoint: String,
    /// Public key of the browser, base64url encoded
    pub p256dh: String,
    /// Authentication secret of the browser, base64url encoded
    pub auth: String,
}

impl PushSubscription {
    pub fn new(user_id: ID, endpoint: String, p256dh: String, auth: String) -> Self {
        Self {
            id: Default::default(),
            user_id,
            endpoint,
            p256dh,
            auth,
        }
    }

    pub fn is_valid_endpoint(endpoint: &str) -> bool {
        match url::Url::parse(endpoint) {
            Ok(url) => url.scheme() == "https" || url.scheme() == "http",
            Err(_) => false,
        }
    }
}

impl Entity for PushSubscription {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushAction {
    pub action: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The JSON document the service worker receives in its `push` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_interaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PushAction>,
}

pub const DEFAULT_BADGE_COUNT: u32 = 1;

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: None,
            tag: None,
            badge_count: None,
            require_interaction: None,
            notification_id: None,
            actions: Vec::new(),
        }
    }

    /// Builds the push message for a rendered notification.
    ///
    /// Clicking the notification opens the primary action, the buttons
    /// mirror the primary and secondary actions.
    pub fn from_rendered(
        kind: NotificationKind,
        event_slug: &str,
        rendered: &RenderedPayload,
    ) -> Self {
        let mut actions = Vec::new();
        if let Some(title) = &rendered.primary_action_label {
            actions.push(PushAction {
                action: "primary".into(),
                title: title.clone(),
                url: rendered.primary_action_url.clone(),
            });
        }
        if let Some(title) = &rendered.secondary_action_label {
            actions.push(PushAction {
                action: "secondary".into(),
                title: title.clone(),
                url: rendered.secondary_action_url.clone(),
            });
        }

        Self {
            title: rendered.title.clone(),
            body: rendered.body.clone(),
            url: rendered.primary_action_url.clone(),
            tag: Some(kind.push_tag(event_slug)),
            badge_count: None,
            require_interaction: if kind.requires_interaction() {
                Some(true)
            } else {
                None
            },
            notification_id: None,
            actions,
        }
    }

    /// Fills in the defaults a client relies on
    pub fn with_defaults(mut self) -> Self {
        if self.badge_count.is_none() {
            self.badge_count = Some(DEFAULT_BADGE_COUNT);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_defaults_badge_count() {
        let msg = PushMessage::new("Hi", "there").with_defaults();
        assert_eq!(msg.badge_count, Some(1));

        let mut msg = PushMessage::new("Hi", "there");
        msg.badge_count = Some(4);
        assert_eq!(msg.with_defaults().badge_count, Some(4));
    }

    #[test]
    fn it_skips_empty_fields_when_serialized() {
        let json = serde_json::to_value(PushMessage::new("Hi", "there")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Hi", "body": "there" }));
    }

    #[test]
    fn it_builds_message_from_rendered_payload() {
        let rendered = RenderedPayload {
            title: "📅 \"Beach BBQ\" is tomorrow".into(),
            body: "Still coming?".into(),
            primary_action_label: Some("Yes, I'll be there".into()),
            primary_action_url: Some("https://gather.test/en/events/beach-bbq?rsvp=yes".into()),
            secondary_action_label: Some("Can't make it".into()),
            secondary_action_url: Some("https://gather.test/en/events/beach-bbq?rsvp=no".into()),
        };
        let msg = PushMessage::from_rendered(
            NotificationKind::ConfirmAttendance24h,
            "beach-bbq",
            &rendered,
        );
        assert_eq!(msg.tag.as_deref(), Some("confirm-24h-beach-bbq"));
        assert_eq!(msg.require_interaction, Some(true));
        assert_eq!(msg.url, rendered.primary_action_url);
        assert_eq!(msg.actions.len(), 2);
        assert_eq!(msg.actions[1].action, "secondary");
    }

    #[test]
    fn it_validates_endpoints() {
        assert!(PushSubscription::is_valid_endpoint(
            "https://fcm.googleapis.com/fcm/send/abc"
        ));
        assert!(!PushSubscription::is_valid_endpoint("not a url"));
        assert!(!PushSubscription::is_valid_endpoint("ftp://push.test/abc"));
    }
}
