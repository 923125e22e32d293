//! # Query Profiles
//!
//! A [`QueryProfile`] is built once per evaluation and never mutated
//! afterwards. Every constraint is optional; an unset constraint excludes
//! nothing.

use annadata_core::SchemeCategory;
use serde::{Deserialize, Serialize};

/// Which predicate set the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Browse: text, region, crop and category filters.
    #[default]
    Discovery,
    /// Self-check: region, crop and landholding filters.
    Eligibility,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Eligibility => "eligibility",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable set of constraints for one evaluation.
///
/// Built with the `with_*` methods, which normalize as they go: text is
/// trimmed, blank region and crop values are treated as unset, and a
/// landholding that is negative or not finite is dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryProfile {
    mode: MatchMode,
    text: String,
    region: Option<String>,
    crop: Option<String>,
    category: Option<SchemeCategory>,
    landholding_ha: Option<f64>,
    income: Option<u64>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl QueryProfile {
    /// An unconstrained discovery query.
    pub fn discovery() -> Self {
        Self::default()
    }

    /// An unconstrained eligibility profile.
    pub fn eligibility() -> Self {
        Self {
            mode: MatchMode::Eligibility,
            ..Self::default()
        }
    }

    /// The same constraints evaluated under `mode`.
    pub fn in_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the search text. Matched as given; callers normalize raw input.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = non_blank(region);
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = non_blank(crop);
        self
    }

    pub fn with_category(mut self, category: SchemeCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the landholding in hectares. Negative or non-finite values leave
    /// it unset.
    pub fn with_landholding(mut self, hectares: f64) -> Self {
        self.landholding_ha = (hectares.is_finite() && hectares >= 0.0).then_some(hectares);
        self
    }

    /// Set annual income in whole rupees. Carried for display; no predicate
    /// constrains on it.
    pub fn with_income(mut self, rupees: u64) -> Self {
        self.income = Some(rupees);
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Search text. Empty means no text constraint.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn crop(&self) -> Option<&str> {
        self.crop.as_deref()
    }

    pub fn category(&self) -> Option<SchemeCategory> {
        self.category
    }

    pub fn landholding_ha(&self) -> Option<f64> {
        self.landholding_ha
    }

    pub fn income(&self) -> Option<u64> {
        self.income
    }

    /// Whether no constraint relevant to the profile's mode is set.
    pub fn is_unconstrained(&self) -> bool {
        let shared = self.region.is_none() && self.crop.is_none();
        match self.mode {
            MatchMode::Discovery => shared && self.text.is_empty() && self.category.is_none(),
            MatchMode::Eligibility => shared && self.landholding_ha.is_none(),
        }
    }
}
