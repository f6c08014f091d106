mod event;
mod locale;
mod notification;
mod profile;
mod push_subscription;
mod quota;
mod reminder;
mod shared;
mod subscriber;
mod templates;

pub use event::EventDetails;
pub use locale::{Locale, LocaleParseError};
pub use notification::{EventRef, NotificationEvent, NotificationKind};
pub use profile::Profile;
pub use push_subscription::{PushAction, PushMessage, PushSubscription, DEFAULT_BADGE_COUNT};
pub use quota::{InviteQuota, QuotaCheck, QuotaExceededReason, QuotaLimits, DAY_MILLIS, WEEK_MILLIS};
pub use reminder::{plan_reminders, ReminderKind, ScheduledReminder};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscriber::generate_subscriber_hash;
pub use templates::{ButtonLabel, RenderedPayload, TemplateRenderer};
