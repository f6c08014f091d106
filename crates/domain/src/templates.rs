use crate::notification::{NotificationEvent, NotificationKind};
use crate::Locale;
use serde::{Deserialize, Serialize};

/// The rendered text of a notification, shared by every delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPayload {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_action_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_action_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_action_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_action_url: Option<String>,
}

/// Button labels are shared between several kinds of notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    ViewEvent,
    Yes,
    No,
    GetDirections,
    ChangePlans,
}

impl ButtonLabel {
    pub fn text(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::ViewEvent, Locale::En) => "View event",
            (Self::ViewEvent, Locale::Vi) => "Xem sự kiện",
            (Self::ViewEvent, Locale::Ko) => "이벤트 보기",
            (Self::Yes, Locale::En) => "Yes, I'll be there",
            (Self::Yes, Locale::Vi) => "Có, tôi sẽ đến",
            (Self::Yes, Locale::Ko) => "네, 갈게요",
            (Self::No, Locale::En) => "Can't make it",
            (Self::No, Locale::Vi) => "Không đến được",
            (Self::No, Locale::Ko) => "못 가요",
            (Self::GetDirections, Locale::En) => "Get directions",
            (Self::GetDirections, Locale::Vi) => "Chỉ đường",
            (Self::GetDirections, Locale::Ko) => "길찾기",
            (Self::ChangePlans, Locale::En) => "Change plans",
            (Self::ChangePlans, Locale::Vi) => "Đổi kế hoạch",
            (Self::ChangePlans, Locale::Ko) => "일정 변경",
        }
    }
}

/// Renders `NotificationEvent`s into the text shown to users.
///
/// Links point into the web application located at `app_base_url`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    app_base_url: String,
}

impl TemplateRenderer {
    pub fn new(app_base_url: impl Into<String>) -> Self {
        let app_base_url: String = app_base_url.into();
        Self {
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn event_url(&self, locale: Locale, slug: &str) -> String {
        format!("{}/{}/events/{}", self.app_base_url, locale, slug)
    }

    fn rsvp_url(&self, locale: Locale, slug: &str, answer: &str) -> String {
        format!("{}?rsvp={}", self.event_url(locale, slug), answer)
    }

    pub fn render(&self, notification: &NotificationEvent, locale: Locale) -> RenderedPayload {
        let title = title(notification, locale);
        let body = body(notification, locale);
        let event_url = self.event_url(locale, notification.event_slug());

        let (primary, secondary) = if notification.kind().asks_for_confirmation() {
            let slug = notification.event_slug();
            (
                Some((ButtonLabel::Yes, self.rsvp_url(locale, slug, "yes"))),
                Some((ButtonLabel::No, self.rsvp_url(locale, slug, "no"))),
            )
        } else {
            match notification {
                NotificationEvent::RsvpConfirmation { event }
                | NotificationEvent::EventInvitation { event, .. } => (
                    Some((ButtonLabel::ViewEvent, event_url)),
                    event
                        .google_maps_url
                        .clone()
                        .map(|url| (ButtonLabel::GetDirections, url)),
                ),
                NotificationEvent::FinalReminder2h { event } => (
                    Some((
                        ButtonLabel::GetDirections,
                        event.google_maps_url.clone().unwrap_or(event_url.clone()),
                    )),
                    Some((ButtonLabel::ChangePlans, event_url)),
                ),
                _ => (Some((ButtonLabel::ViewEvent, event_url)), None),
            }
        };

        let (primary_action_label, primary_action_url) = split_action(primary, locale);
        let (secondary_action_label, secondary_action_url) = split_action(secondary, locale);

        RenderedPayload {
            title,
            body,
            primary_action_label,
            primary_action_url,
            secondary_action_label,
            secondary_action_url,
        }
    }
}

fn split_action(
    action: Option<(ButtonLabel, String)>,
    locale: Locale,
) -> (Option<String>, Option<String>) {
    match action {
        Some((label, url)) => (Some(label.text(locale).to_string()), Some(url)),
        None => (None, None),
    }
}

fn title(notification: &NotificationEvent, locale: Locale) -> String {
    let t = notification.event_title();
    match (notification, locale) {
        (NotificationEvent::RsvpConfirmation { .. }, Locale::En) => {
            format!("✅ You're going to \"{}\"", t)
        }
        (NotificationEvent::RsvpConfirmation { .. }, Locale::Vi) => {
            format!("✅ Bạn sẽ tham gia \"{}\"", t)
        }
        (NotificationEvent::RsvpConfirmation { .. }, Locale::Ko) => {
            format!("✅ \"{}\" 참석이 확정되었어요", t)
        }

        (NotificationEvent::ConfirmAttendance24h { .. }, Locale::En) => {
            format!("📅 \"{}\" is tomorrow", t)
        }
        (NotificationEvent::ConfirmAttendance24h { .. }, Locale::Vi) => {
            format!("📅 \"{}\" diễn ra vào ngày mai", t)
        }
        (NotificationEvent::ConfirmAttendance24h { .. }, Locale::Ko) => {
            format!("📅 \"{}\" 이벤트가 내일이에요", t)
        }

        (NotificationEvent::FinalReminder2h { .. }, Locale::En) => {
            format!("⏰ \"{}\" starts in 2 hours", t)
        }
        (NotificationEvent::FinalReminder2h { .. }, Locale::Vi) => {
            format!("⏰ \"{}\" sẽ bắt đầu sau 2 giờ nữa", t)
        }
        (NotificationEvent::FinalReminder2h { .. }, Locale::Ko) => {
            format!("⏰ \"{}\" 이벤트가 2시간 후에 시작해요", t)
        }

        (NotificationEvent::WaitlistPromotion { .. }, Locale::En) => {
            format!("🎉 You got a spot for \"{}\"! See you there.", t)
        }
        (NotificationEvent::WaitlistPromotion { .. }, Locale::Vi) => {
            format!("🎉 Bạn đã có chỗ cho \"{}\"! Hẹn gặp bạn.", t)
        }
        (NotificationEvent::WaitlistPromotion { .. }, Locale::Ko) => {
            format!("🎉 \"{}\" 자리가 생겼어요! 곧 만나요.", t)
        }

        (NotificationEvent::EventReminder { .. }, Locale::En) => format!("🔔 Reminder: \"{}\"", t),
        (NotificationEvent::EventReminder { .. }, Locale::Vi) => format!("🔔 Nhắc nhở: \"{}\"", t),
        (NotificationEvent::EventReminder { .. }, Locale::Ko) => format!("🔔 알림: \"{}\"", t),

        (NotificationEvent::ConfirmAttendance { .. }, Locale::En) => {
            format!("Will you attend \"{}\"?", t)
        }
        (NotificationEvent::ConfirmAttendance { .. }, Locale::Vi) => {
            format!("Bạn sẽ tham dự \"{}\" chứ?", t)
        }
        (NotificationEvent::ConfirmAttendance { .. }, Locale::Ko) => {
            format!("\"{}\"에 참석하시나요?", t)
        }

        (NotificationEvent::WaitlistPositionUpdate { position, .. }, Locale::En) => {
            format!("You're #{} on the waitlist for \"{}\"", position, t)
        }
        (NotificationEvent::WaitlistPositionUpdate { position, .. }, Locale::Vi) => {
            format!("Bạn đang ở vị trí #{} trong danh sách chờ \"{}\"", position, t)
        }
        (NotificationEvent::WaitlistPositionUpdate { position, .. }, Locale::Ko) => {
            format!("\"{}\" 대기 순번 #{}", t, position)
        }

        (NotificationEvent::NewRsvpForOrganizer { attendee_name, .. }, Locale::En) => {
            format!("👋 {} is going to \"{}\"", attendee_name, t)
        }
        (NotificationEvent::NewRsvpForOrganizer { attendee_name, .. }, Locale::Vi) => {
            format!("👋 {} sẽ tham gia \"{}\"", attendee_name, t)
        }
        (NotificationEvent::NewRsvpForOrganizer { attendee_name, .. }, Locale::Ko) => {
            format!("👋 {}님이 \"{}\"에 참석해요", attendee_name, t)
        }

        (NotificationEvent::EventInvitation { inviter_name, .. }, Locale::En) => {
            format!("💌 {} invited you to \"{}\"", inviter_name, t)
        }
        (NotificationEvent::EventInvitation { inviter_name, .. }, Locale::Vi) => {
            format!("💌 {} đã mời bạn tham gia \"{}\"", inviter_name, t)
        }
        (NotificationEvent::EventInvitation { inviter_name, .. }, Locale::Ko) => {
            format!("💌 {}님이 \"{}\"에 초대했어요", inviter_name, t)
        }
    }
}

fn body(notification: &NotificationEvent, locale: Locale) -> String {
    match notification {
        NotificationEvent::RsvpConfirmation { event }
        | NotificationEvent::FinalReminder2h { event }
        | NotificationEvent::EventReminder { event }
        | NotificationEvent::EventInvitation { event, .. } => event.summary_line(locale),
        NotificationEvent::ConfirmAttendance24h { event } => {
            let prompt = match locale {
                Locale::En => "Still coming? Let the host know.",
                Locale::Vi => "Bạn vẫn sẽ đến chứ? Hãy cho chủ sự kiện biết.",
                Locale::Ko => "아직 참석하시나요? 호스트에게 알려주세요.",
            };
            format!("{} {}", prompt, event.summary_line(locale))
        }
        NotificationEvent::WaitlistPromotion { .. } => match locale {
            Locale::En => "Someone cancelled, so you've moved off the waitlist.",
            Locale::Vi => "Có người đã hủy, bạn đã được chuyển khỏi danh sách chờ.",
            Locale::Ko => "취소자가 생겨 대기자 명단에서 참석자로 변경되었어요.",
        }
        .to_string(),
        NotificationEvent::ConfirmAttendance { .. } => match locale {
            Locale::En => "Please confirm so the host can plan.",
            Locale::Vi => "Vui lòng xác nhận để chủ sự kiện chuẩn bị.",
            Locale::Ko => "호스트가 준비할 수 있도록 확인해 주세요.",
        }
        .to_string(),
        NotificationEvent::WaitlistPositionUpdate { .. } => match locale {
            Locale::En => "We'll let you know as soon as a spot opens up.",
            Locale::Vi => "Chúng tôi sẽ báo ngay khi có chỗ trống.",
            Locale::Ko => "자리가 나면 바로 알려드릴게요.",
        }
        .to_string(),
        NotificationEvent::NewRsvpForOrganizer { going_count, .. } => match locale {
            Locale::En if *going_count == 1 => "1 person is going".to_string(),
            Locale::En => format!("{} people are going", going_count),
            Locale::Vi => format!("{} người sẽ tham gia", going_count),
            Locale::Ko => format!("{}명이 참석해요", going_count),
        },
    }
}

impl NotificationKind {
    /// Whether rendering this kind yields a yes/no answer prompt
    pub fn asks_for_confirmation(&self) -> bool {
        matches!(self, Self::ConfirmAttendance24h | Self::ConfirmAttendance)
    }
}
