use crate::shared::entity::ID;
use crate::Locale;
use chrono::{LocalResult, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The parts of an event that notifications talk about.
///
/// Events themselves live in the application's data store, this is the
/// snapshot handed to us when an application event happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub id: ID,
    pub title: String,
    pub slug: String,
    /// Start of the event as a timestamp in millis
    pub starts_at: i64,
    /// Timezone the event takes place in, used when printing the start time
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
}

fn default_timezone() -> Tz {
    Tz::UTC
}

impl EventDetails {
    /// Human readable start time in the event's timezone
    pub fn format_starts_at(&self, locale: Locale) -> String {
        let starts_at = match Utc.timestamp_millis_opt(self.starts_at) {
            LocalResult::Single(dt) => dt.with_timezone(&self.timezone),
            _ => return String::new(),
        };
        let pattern = match locale {
            Locale::En => "%a, %b %-d · %-I:%M %p",
            Locale::Vi => "%H:%M, %d/%m/%Y",
            Locale::Ko => "%-m월 %-d일 %H:%M",
        };
        starts_at.format(pattern).to_string()
    }

    /// `location · time`, or just the time when the event has no location
    pub fn summary_line(&self, locale: Locale) -> String {
        let starts_at = self.format_starts_at(locale);
        match &self.location_name {
            Some(location) if !location.trim().is_empty() => {
                format!("{} · {}", starts_at, location)
            }
            _ => starts_at,
        }
    }
}
