use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The languages notifications can be rendered in.
///
/// This is a closed set so that every template table is matched exhaustively,
/// an unsupported language can therefore only be encountered when parsing
/// user provided input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Vi,
    Ko,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Vi, Locale::Ko];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
            Self::Ko => "ko",
        }
    }

    /// Resolves a locale stored on a profile or sent by a client.
    ///
    /// Region subtags are ignored (`vi-VN` is `vi`), anything unknown or
    /// missing resolves to the base locale.
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some(value) => value.parse().unwrap_or_default(),
            None => Self::default(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::En
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LocaleParseError {
    #[error("Locale: {0} is not supported")]
    Unsupported(String),
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Self::En),
            "vi" => Ok(Self::Vi),
            "ko" => Ok(Self::Ko),
            _ => Err(LocaleParseError::Unsupported(s.to_string())),
        }
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct LocaleVisitor;

        impl<'de> Visitor<'de> for LocaleVisitor {
            type Value = Locale;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A supported locale: en, vi or ko")
            }

            fn visit_str<E>(self, value: &str) -> Result<Locale, E>
            where
                E: serde::de::Error,
            {
                value.parse::<Locale>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(LocaleVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_supported_locales() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("vi-VN".parse::<Locale>(), Ok(Locale::Vi));
        assert_eq!("KO_kr".parse::<Locale>(), Ok(Locale::Ko));
    }

    #[test]
    fn it_rejects_unsupported_locale() {
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(LocaleParseError::Unsupported("fr".into()))
        );
    }

    #[test]
    fn it_resolves_unknown_locale_to_base() {
        assert_eq!(Locale::resolve(Some("de")), Locale::En);
        assert_eq!(Locale::resolve(None), Locale::En);
        assert_eq!(Locale::resolve(Some("vi")), Locale::Vi);
    }
}
