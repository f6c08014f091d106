use crate::shared::entity::{Entity, ID};
use crate::Locale;

/// The parts of a user's profile in the application that notifications
/// need. Profiles are owned by the application, this is a mirror kept
/// current when the application identifies a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: ID,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// Locale as stored by the application, which may not be supported
    pub locale: Option<String>,
}

impl Profile {
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            display_name: None,
            email: None,
            locale: None,
        }
    }

    pub fn resolved_locale(&self) -> Locale {
        Locale::resolve(self.locale.as_deref())
    }

    pub fn has_supported_locale(&self) -> bool {
        match &self.locale {
            Some(locale) => locale.parse::<Locale>().is_ok(),
            None => true,
        }
    }

    pub fn first_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }
}

impl Entity for Profile {
    fn id(&self) -> &ID {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_resolves_profile_locale() {
        let mut profile = Profile::new(ID::default());
        assert_eq!(profile.resolved_locale(), Locale::En);
        assert!(profile.has_supported_locale());

        profile.locale = Some("vi".into());
        assert_eq!(profile.resolved_locale(), Locale::Vi);

        profile.locale = Some("ja".into());
        assert_eq!(profile.resolved_locale(), Locale::En);
        assert!(!profile.has_supported_locale());
    }

    #[test]
    fn it_takes_first_name_from_display_name() {
        let mut profile = Profile::new(ID::default());
        assert_eq!(profile.first_name(), None);
        profile.display_name = Some("Nguyen Van A".into());
        assert_eq!(profile.first_name(), Some("Nguyen"));
    }
}
