use crate::event::EventDetails;
use crate::templates::RenderedPayload;
use crate::Locale;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Title and slug of an event, for notifications that do not print when
/// or where the event takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRef {
    pub title: String,
    pub slug: String,
}

impl From<&EventDetails> for EventRef {
    fn from(e: &EventDetails) -> Self {
        Self {
            title: e.title.clone(),
            slug: e.slug.clone(),
        }
    }
}

/// The different kinds of notifications that can be delivered.
///
/// Both the template used to render a notification and the workflow that is
/// triggered at the workflow engine are derived from this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    RsvpConfirmation,
    ConfirmAttendance24h,
    FinalReminder2h,
    WaitlistPromotion,
    EventReminder,
    ConfirmAttendance,
    WaitlistPositionUpdate,
    NewRsvpForOrganizer,
    EventInvitation,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 9] = [
        NotificationKind::RsvpConfirmation,
        NotificationKind::ConfirmAttendance24h,
        NotificationKind::FinalReminder2h,
        NotificationKind::WaitlistPromotion,
        NotificationKind::EventReminder,
        NotificationKind::ConfirmAttendance,
        NotificationKind::WaitlistPositionUpdate,
        NotificationKind::NewRsvpForOrganizer,
        NotificationKind::EventInvitation,
    ];

    /// Identifier of the workflow at the workflow engine
    pub fn workflow_key(&self) -> &'static str {
        match self {
            Self::RsvpConfirmation => "rsvp",
            Self::ConfirmAttendance24h => "24h-re-confirmation",
            Self::FinalReminder2h => "2h-reminder",
            Self::WaitlistPromotion => "waitlist-promotion",
            Self::EventReminder => "event-reminder",
            Self::ConfirmAttendance => "confirm-attendance",
            Self::WaitlistPositionUpdate => "waitlist-position-update",
            Self::NewRsvpForOrganizer => "new-rsvp-organizer",
            Self::EventInvitation => "event-invitation",
        }
    }

    /// Push notifications with the same tag replace each other on the device
    fn tag_prefix(&self) -> &'static str {
        match self {
            Self::RsvpConfirmation => "rsvp",
            Self::ConfirmAttendance24h => "confirm-24h",
            Self::FinalReminder2h => "reminder-2h",
            Self::WaitlistPromotion => "waitlist",
            Self::EventReminder => "reminder",
            Self::ConfirmAttendance => "confirm",
            Self::WaitlistPositionUpdate => "waitlist-position",
            Self::NewRsvpForOrganizer => "new-rsvp",
            Self::EventInvitation => "invite",
        }
    }

    pub fn push_tag(&self, event_slug: &str) -> String {
        format!("{}-{}", self.tag_prefix(), event_slug)
    }

    /// Whether the push notification should stay until the user acts on it
    pub fn requires_interaction(&self) -> bool {
        matches!(
            self,
            Self::ConfirmAttendance24h | Self::ConfirmAttendance | Self::FinalReminder2h
        )
    }
}

/// Something that happened that a user should be notified about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NotificationEvent {
    RsvpConfirmation {
        event: EventDetails,
    },
    ConfirmAttendance24h {
        event: EventDetails,
    },
    FinalReminder2h {
        event: EventDetails,
    },
    WaitlistPromotion {
        event: EventRef,
    },
    EventReminder {
        event: EventDetails,
    },
    ConfirmAttendance {
        event: EventRef,
    },
    WaitlistPositionUpdate {
        event: EventRef,
        position: u32,
    },
    #[serde(rename_all = "camelCase")]
    NewRsvpForOrganizer {
        event: EventRef,
        attendee_name: String,
        going_count: u32,
    },
    #[serde(rename_all = "camelCase")]
    EventInvitation {
        event: EventDetails,
        inviter_name: String,
    },
}

impl NotificationEvent {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::RsvpConfirmation { .. } => NotificationKind::RsvpConfirmation,
            Self::ConfirmAttendance24h { .. } => NotificationKind::ConfirmAttendance24h,
            Self::FinalReminder2h { .. } => NotificationKind::FinalReminder2h,
            Self::WaitlistPromotion { .. } => NotificationKind::WaitlistPromotion,
            Self::EventReminder { .. } => NotificationKind::EventReminder,
            Self::ConfirmAttendance { .. } => NotificationKind::ConfirmAttendance,
            Self::WaitlistPositionUpdate { .. } => NotificationKind::WaitlistPositionUpdate,
            Self::NewRsvpForOrganizer { .. } => NotificationKind::NewRsvpForOrganizer,
            Self::EventInvitation { .. } => NotificationKind::EventInvitation,
        }
    }

    pub fn event_title(&self) -> &str {
        match self {
            Self::RsvpConfirmation { event }
            | Self::ConfirmAttendance24h { event }
            | Self::FinalReminder2h { event }
            | Self::EventReminder { event }
            | Self::EventInvitation { event, .. } => &event.title,
            Self::WaitlistPromotion { event }
            | Self::ConfirmAttendance { event }
            | Self::WaitlistPositionUpdate { event, .. }
            | Self::NewRsvpForOrganizer { event, .. } => &event.title,
        }
    }

    pub fn event_slug(&self) -> &str {
        match self {
            Self::RsvpConfirmation { event }
            | Self::ConfirmAttendance24h { event }
            | Self::FinalReminder2h { event }
            | Self::EventReminder { event }
            | Self::EventInvitation { event, .. } => &event.slug,
            Self::WaitlistPromotion { event }
            | Self::ConfirmAttendance { event }
            | Self::WaitlistPositionUpdate { event, .. }
            | Self::NewRsvpForOrganizer { event, .. } => &event.slug,
        }
    }

    /// Payload sent along with the workflow trigger.
    ///
    /// `message` is what the in-app inbox shows, the remaining fields are
    /// available to the email step of the workflow.
    pub fn workflow_payload(&self, rendered: &RenderedPayload, locale: Locale) -> Value {
        json!({
            "message": rendered.title,
            "body": rendered.body,
            "locale": locale.as_str(),
            "eventTitle": self.event_title(),
            "eventSlug": self.event_slug(),
            "primaryActionLabel": rendered.primary_action_label,
            "primaryActionUrl": rendered.primary_action_url,
            "secondaryActionLabel": rendered.secondary_action_label,
            "secondaryActionUrl": rendered.secondary_action_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn workflow_keys_are_unique() {
        let keys = NotificationKind::ALL
            .iter()
            .map(|k| k.workflow_key())
            .collect::<HashSet<_>>();
        assert_eq!(keys.len(), NotificationKind::ALL.len());
    }

    #[test]
    fn it_builds_push_tag_from_slug() {
        assert_eq!(
            NotificationKind::WaitlistPromotion.push_tag("beach-bbq"),
            "waitlist-beach-bbq"
        );
    }

    #[test]
    fn it_deserializes_tagged_notification() {
        let json = r#"{
            "kind": "newRsvpForOrganizer",
            "event": { "title": "Beach BBQ", "slug": "beach-bbq" },
            "attendeeName": "Linh",
            "goingCount": 12
        }"#;
        let notification: NotificationEvent = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind(), NotificationKind::NewRsvpForOrganizer);
        assert_eq!(notification.event_slug(), "beach-bbq");
    }
}
