//! # Input Normalization
//!
//! Raw form input (HTTP query strings and bodies, CLI flags) arrives as
//! loosely typed strings. [`QueryForm`] collects it and converts it into a
//! [`QueryProfile`]; malformed values become "unset" rather than errors so
//! the engine never sees them.

use annadata_core::{Locale, SchemeCategory};
use serde::{Deserialize, Deserializer};

use crate::query::{MatchMode, QueryProfile};

/// Query input exactly as submitted.
///
/// Numeric fields accept either JSON numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub landholding: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub income: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

impl QueryForm {
    /// Convert to a profile evaluated under `mode`.
    pub fn to_profile(&self, mode: MatchMode) -> QueryProfile {
        let mut profile = QueryProfile::discovery().in_mode(mode);
        if let Some(q) = self.q.as_deref().map(str::trim) {
            profile = profile.with_text(q);
        }
        if let Some(region) = &self.region {
            profile = profile.with_region(region.as_str());
        }
        if let Some(crop) = &self.crop {
            profile = profile.with_crop(crop.as_str());
        }
        if let Some(category) = self.category.as_deref().and_then(parse_category) {
            profile = profile.with_category(category);
        }
        if let Some(ha) = self.landholding.as_deref().and_then(parse_landholding) {
            profile = profile.with_landholding(ha);
        }
        if let Some(rupees) = self.income.as_deref().and_then(parse_income) {
            profile = profile.with_income(rupees);
        }
        profile
    }

    /// The requested locale; absent or unrecognized values fall back to the
    /// primary locale.
    pub fn locale(&self) -> Locale {
        parse_locale(self.lang.as_deref())
    }
}

/// Locale from a `lang` parameter; absent, blank or unrecognized values
/// give the primary locale.
pub fn parse_locale(raw: Option<&str>) -> Locale {
    match raw.map(str::trim) {
        None | Some("") => Locale::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(lang = raw, "unrecognized locale, using default");
            Locale::default()
        }),
    }
}

/// Case-insensitive category parse; blank or unknown is unset.
pub fn parse_category(raw: &str) -> Option<SchemeCategory> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(category) => Some(category),
        Err(_) => {
            tracing::debug!(category = trimmed, "ignoring unknown category filter");
            None
        }
    }
}

/// Parse hectares. Non-numeric, non-finite or negative input is unset.
pub fn parse_landholding(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(ha) if ha.is_finite() && ha >= 0.0 => Some(ha),
        _ => {
            tracing::debug!(landholding = trimmed, "ignoring malformed landholding");
            None
        }
    }
}

/// Parse annual income in rupees. Digit-group separators (`,` and `_`)
/// are ignored and fractional rupees truncated; anything else that is not
/// a non-negative number is unset.
pub fn parse_income(raw: &str) -> Option<u64> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_'))
        .collect();
    if compact.is_empty() {
        return None;
    }
    match compact.parse::<f64>() {
        Ok(rupees) if rupees.is_finite() && rupees >= 0.0 && rupees < u64::MAX as f64 => {
            Some(rupees.trunc() as u64)
        }
        _ => {
            tracing::debug!(income = raw.trim(), "ignoring malformed income");
            None
        }
    }
}
