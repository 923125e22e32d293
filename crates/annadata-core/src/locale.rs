//! # Locales and Localized Text
//!
//! The portal serves two locales: English (primary) and Hindi (secondary).
//! Scheme text is stored once per locale in a [`LocalizedText`]; the
//! [`LocaleResolver`] trait is the single place where "which variant do we
//! show" is decided.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// A supported UI locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (India). The primary locale.
    #[default]
    En,
    /// Hindi. The secondary locale.
    Hi,
}

impl Locale {
    /// All supported locales, primary first.
    pub fn all() -> &'static [Locale] {
        &[Self::En, Self::Hi]
    }

    /// Short language tag as used in query parameters and preference storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// BCP 47 tag handed to speech synthesis and recognition.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Self::En => "en-IN",
            Self::Hi => "hi-IN",
        }
    }

    /// The other locale.
    pub fn toggled(&self) -> Self {
        match self {
            Self::En => Self::Hi,
            Self::Hi => Self::En,
        }
    }

    /// Whether this is the primary locale.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::En)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    /// Accepts `en`/`hi` and their speech tags `en-IN`/`hi-IN`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-in" => Ok(Self::En),
            "hi" | "hi-in" => Ok(Self::Hi),
            _ => Err(ValidationError::UnknownLocale(s.to_string())),
        }
    }
}

/// Text with one variant per supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English variant.
    pub en: String,
    /// Hindi variant.
    pub hi: String,
}

impl LocalizedText {
    /// Create localized text from both variants.
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    /// The variant for `locale`.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Hi => &self.hi,
        }
    }

    /// Locales whose variant is empty or whitespace-only.
    pub fn missing_locales(&self) -> Vec<Locale> {
        Locale::all()
            .iter()
            .copied()
            .filter(|l| self.get(*l).trim().is_empty())
            .collect()
    }
}

/// Resolves which locale is active and picks the matching text variant.
///
/// Implemented by [`Locale`] itself (a fixed locale) and by anything that
/// tracks a user's language choice.
pub trait LocaleResolver {
    /// The locale active at call time.
    fn active_locale(&self) -> Locale;

    /// The variant of `text` for the active locale.
    fn resolve<'a>(&self, text: &'a LocalizedText) -> &'a str {
        text.get(self.active_locale())
    }
}

impl LocaleResolver for Locale {
    fn active_locale(&self) -> Locale {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_short_and_speech_tags() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("HI".parse::<Locale>().unwrap(), Locale::Hi);
        assert_eq!("hi-IN".parse::<Locale>().unwrap(), Locale::Hi);
        assert_eq!(" en-in ".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(ValidationError::UnknownLocale("fr".to_string()))
        );
    }

    #[test]
    fn locale_toggle_is_an_involution() {
        for locale in Locale::all() {
            assert_ne!(locale.toggled(), *locale);
            assert_eq!(locale.toggled().toggled(), *locale);
        }
    }

    #[test]
    fn locale_serde_uses_short_tags() {
        assert_eq!(serde_json::to_string(&Locale::Hi).unwrap(), "\"hi\"");
        let back: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Locale::En);
    }

    #[test]
    fn default_locale_is_primary() {
        assert!(Locale::default().is_primary());
        assert_eq!(Locale::En.speech_tag(), "en-IN");
        assert_eq!(Locale::Hi.speech_tag(), "hi-IN");
    }

    #[test]
    fn resolver_picks_active_variant() {
        let text = LocalizedText::new("Crop Insurance Scheme", "फसल बीमा योजना");
        assert_eq!(Locale::En.resolve(&text), "Crop Insurance Scheme");
        assert_eq!(Locale::Hi.resolve(&text), "फसल बीमा योजना");
    }

    #[test]
    fn missing_locales_reports_blank_variants() {
        let text = LocalizedText::new("Soil Health Card", "  ");
        assert_eq!(text.missing_locales(), vec![Locale::Hi]);
        assert!(LocalizedText::new("a", "b").missing_locales().is_empty());
    }
}
