//! # Scheme Records
//!
//! The immutable record describing one government agricultural scheme,
//! plus the field types that give its matching-relevant fields structure:
//!
//! - [`RegionScope`]: the `"ALL"` sentinel or one exact region name.
//! - [`CropCoverage`]: the `"ALL"` sentinel or an explicit crop list.
//! - [`SchemeCategory`]: subsidy, insurance, loan or other.
//! - [`EligibilityTag`]: a free-text eligibility descriptor in one locale.
//!
//! Legacy catalog files spell the sentinels `"All India"` and `"All Crops"`;
//! both are accepted on load and normalized to the variants above.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::identity::SchemeId;
use crate::locale::{Locale, LocalizedText};

/// Sentinel meaning "matches any query value for this field".
pub const ALL_SENTINEL: &str = "ALL";

const REGION_SENTINEL_ALIASES: &[&str] = &[ALL_SENTINEL, "All India"];
const CROP_SENTINEL_ALIASES: &[&str] = &[ALL_SENTINEL, "All Crops"];

// ---------------------------------------------------------------------------
// RegionScope
// ---------------------------------------------------------------------------

/// Where a scheme is offered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionScope {
    /// Offered nationwide; covers every region query.
    All,
    /// Offered in exactly one named region (state).
    Named(String),
}

impl RegionScope {
    /// Parse a catalog region value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRegion`] for blank input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRegion);
        }
        if REGION_SENTINEL_ALIASES.contains(&trimmed) {
            return Ok(Self::All);
        }
        Ok(Self::Named(trimmed.to_string()))
    }

    /// Whether this scope covers `region`. Exact, case-sensitive comparison.
    pub fn covers(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == region,
        }
    }

    /// Whether this is the nationwide sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The catalog spelling of this scope.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Named(name) => name,
        }
    }
}

impl std::fmt::Display for RegionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RegionScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RegionScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CropCoverage
// ---------------------------------------------------------------------------

/// Which crops a scheme applies to.
///
/// `Listed` may be empty; an empty list never matches a crop-filtered query.
/// Only the sentinel short-circuits the crop predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CropCoverage {
    /// Applies to every crop.
    All,
    /// Applies to exactly these crops, in catalog order, without duplicates.
    Listed(Vec<String>),
}

impl CropCoverage {
    /// Build coverage from catalog values. Any sentinel spelling in the
    /// list collapses the coverage to [`CropCoverage::All`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCrop`] if any entry is blank.
    pub fn from_values<I, S>(values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut crops: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() {
                return Err(ValidationError::EmptyCrop);
            }
            if CROP_SENTINEL_ALIASES.contains(&trimmed) {
                return Ok(Self::All);
            }
            if !crops.iter().any(|c| c == trimmed) {
                crops.push(trimmed.to_string());
            }
        }
        Ok(Self::Listed(crops))
    }

    /// Whether `crop` is covered. Exact, case-sensitive comparison.
    pub fn covers(&self, crop: &str) -> bool {
        match self {
            Self::All => true,
            Self::Listed(crops) => crops.iter().any(|c| c == crop),
        }
    }

    /// Whether this is the every-crop sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The explicitly listed crops (empty for the sentinel).
    pub fn listed(&self) -> &[String] {
        match self {
            Self::All => &[],
            Self::Listed(crops) => crops,
        }
    }
}

impl Serialize for CropCoverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => [ALL_SENTINEL].serialize(serializer),
            Self::Listed(crops) => crops.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CropCoverage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        let values = match Raw::deserialize(deserializer)? {
            Raw::One(value) => vec![value],
            Raw::Many(values) => values,
        };
        Self::from_values(values).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SchemeCategory
// ---------------------------------------------------------------------------

/// Kind of benefit a scheme provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeCategory {
    /// Direct payments or input subsidies.
    Subsidy,
    /// Crop or livestock insurance.
    Insurance,
    /// Credit and loan programmes.
    Loan,
    /// Everything else (advisory, testing, training).
    Other,
}

impl SchemeCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [SchemeCategory] {
        &[Self::Subsidy, Self::Insurance, Self::Loan, Self::Other]
    }

    /// The lowercase identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subsidy => "subsidy",
            Self::Insurance => "insurance",
            Self::Loan => "loan",
            Self::Other => "other",
        }
    }

    /// Human-readable label in `locale`.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Subsidy, Locale::En) => "Subsidy",
            (Self::Subsidy, Locale::Hi) => "सब्सिडी",
            (Self::Insurance, Locale::En) => "Insurance",
            (Self::Insurance, Locale::Hi) => "बीमा",
            (Self::Loan, Locale::En) => "Loan",
            (Self::Loan, Locale::Hi) => "ऋण",
            (Self::Other, Locale::En) => "Other",
            (Self::Other, Locale::Hi) => "अन्य",
        }
    }
}

impl std::fmt::Display for SchemeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subsidy" => Ok(Self::Subsidy),
            "insurance" => Ok(Self::Insurance),
            "loan" => Ok(Self::Loan),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// EligibilityTag
// ---------------------------------------------------------------------------

/// A free-text eligibility descriptor, written in one locale.
///
/// In catalog files a tag is either a plain string (primary locale) or a
/// `{ text, locale }` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawEligibilityTag")]
pub struct EligibilityTag {
    /// The descriptor text.
    pub text: String,
    /// The locale the text is written in.
    pub locale: Locale,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEligibilityTag {
    Plain(String),
    Localized {
        text: String,
        #[serde(default)]
        locale: Locale,
    },
}

impl From<RawEligibilityTag> for EligibilityTag {
    fn from(raw: RawEligibilityTag) -> Self {
        match raw {
            RawEligibilityTag::Plain(text) => Self::new(text, Locale::En),
            RawEligibilityTag::Localized { text, locale } => Self::new(text, locale),
        }
    }
}

impl EligibilityTag {
    /// Create a tag in `locale`.
    pub fn new(text: impl Into<String>, locale: Locale) -> Self {
        Self {
            text: text.into(),
            locale,
        }
    }
}

// ---------------------------------------------------------------------------
// SchemeRecord
// ---------------------------------------------------------------------------

/// One government scheme as published in the catalog. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    /// Unique, never-reused identifier.
    pub id: SchemeId,
    /// Scheme name.
    pub name: LocalizedText,
    /// One-line description.
    pub description: LocalizedText,
    /// Summary of the benefit.
    pub benefits: LocalizedText,
    /// Region the scheme is offered in.
    #[serde(alias = "state")]
    pub region: RegionScope,
    /// Crops the scheme applies to.
    #[serde(alias = "applicable_crops")]
    pub crops: CropCoverage,
    /// Benefit category.
    #[serde(alias = "type")]
    pub category: SchemeCategory,
    /// Ordered eligibility descriptors.
    #[serde(default, alias = "eligibility")]
    pub eligibility_tags: Vec<EligibilityTag>,
    /// Application deadline, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl SchemeRecord {
    /// Days from `today` until the deadline. Negative once it has passed;
    /// `None` when the scheme has no deadline.
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|d| (d - today).num_days())
    }
}
