//! # Identity Newtypes
//!
//! Validated identifiers. You cannot pass a raw `String` where a
//! [`SchemeId`] is expected, and a [`PhoneNumber`] is always exactly ten
//! digits once constructed.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Implements `Deserialize` for string newtypes by routing the raw string
/// through the type's `new()` constructor, so invalid values are rejected
/// at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Stable identifier of a scheme within a catalog.
///
/// Trimmed and non-empty. Identifiers are never reused, so they are safe
/// to use as URL path segments and cache keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SchemeId(String);

impl_validating_deserialize!(SchemeId);

impl SchemeId {
    /// Create a scheme identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySchemeId`] if nothing remains after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySchemeId);
        }
        Ok(Self(trimmed))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SchemeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<&str> for SchemeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An Indian mobile number used for SMS alert subscriptions.
///
/// Stored as the bare 10-digit subscriber number. Spaces and dashes are
/// ignored on input, as is a leading `+91`, `91` or `0` trunk prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl_validating_deserialize!(PhoneNumber);

impl PhoneNumber {
    /// Number of digits in a subscriber number.
    pub const DIGITS: usize = 10;

    /// Parse and normalize a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPhoneNumber`] unless exactly ten
    /// digits remain after stripping separators and the country/trunk prefix.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let compact: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        let digits = if let Some(rest) = compact.strip_prefix("+91") {
            rest
        } else if compact.len() == Self::DIGITS + 2 && compact.starts_with("91") {
            &compact[2..]
        } else if compact.len() == Self::DIGITS + 1 && compact.starts_with('0') {
            &compact[1..]
        } else {
            compact.as_str()
        };

        if digits.len() != Self::DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneNumber(raw));
        }
        Ok(Self(digits.to_string()))
    }

    /// The bare 10-digit subscriber number.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number in E.164 form (`+91XXXXXXXXXX`).
    pub fn to_e164(&self) -> String {
        format!("+91{}", self.0)
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
