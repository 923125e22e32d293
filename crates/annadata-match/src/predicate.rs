//! # Match Predicates
//!
//! A record matches a query iff every predicate applicable to the query's
//! mode holds. Predicates are pure and independent of one another; each
//! treats an unset query field as "holds".
//!
//! | Predicate     | Discovery | Eligibility |
//! |---------------|-----------|-------------|
//! | `Text`        | yes       |             |
//! | `Region`      | yes       | yes         |
//! | `Crop`        | yes       | yes         |
//! | `Category`    | yes       |             |
//! | `Landholding` |           | yes         |

use annadata_core::{Locale, SchemeRecord};
use serde::Serialize;

use crate::query::{MatchMode, QueryProfile};

/// Landholding (hectares) above which smallholder-only schemes are excluded.
pub const SMALLHOLDER_LIMIT_HA: f64 = 2.0;

/// Substrings that mark an eligibility tag as smallholder-only, per locale.
/// Compared case-insensitively, and only against tags in the same locale.
pub fn smallholder_markers(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => &["small", "marginal"],
        Locale::Hi => &["लघु", "सीमांत", "छोटे"],
    }
}

/// One filter condition of the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Name or description contains the search text (active locale only).
    Text,
    /// Record region is the sentinel or equals the query region.
    Region,
    /// Record crops are the sentinel or contain the query crop.
    Crop,
    /// Record category equals the query category.
    Category,
    /// A smallholder-only record is excluded above the landholding limit.
    Landholding,
}

impl Predicate {
    /// The predicates evaluated in `mode`, in evaluation order.
    pub fn for_mode(mode: MatchMode) -> &'static [Predicate] {
        match mode {
            MatchMode::Discovery => &[Self::Text, Self::Region, Self::Crop, Self::Category],
            MatchMode::Eligibility => &[Self::Region, Self::Crop, Self::Landholding],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Region => "region",
            Self::Crop => "crop",
            Self::Category => "category",
            Self::Landholding => "landholding",
        }
    }

    /// Whether this predicate holds for `record` under `query`, reading
    /// localized text in `locale`.
    pub fn holds(&self, record: &SchemeRecord, query: &QueryProfile, locale: Locale) -> bool {
        match self {
            Self::Text => text_matches(record, query.text(), locale),
            Self::Region => region_matches(record, query.region()),
            Self::Crop => crop_matches(record, query.crop()),
            Self::Category => query.category().map_or(true, |c| record.category == c),
            Self::Landholding => landholding_permits(record, query.landholding_ha()),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Predicate functions
// ---------------------------------------------------------------------------

/// Case-insensitive substring test. An empty needle is contained in
/// everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Text predicate: empty text, or the name or description in `locale`
/// contains it. The other locale's text is never consulted.
pub fn text_matches(record: &SchemeRecord, text: &str, locale: Locale) -> bool {
    text.is_empty()
        || contains_ignore_case(record.name.get(locale), text)
        || contains_ignore_case(record.description.get(locale), text)
}

pub fn region_matches(record: &SchemeRecord, region: Option<&str>) -> bool {
    region.map_or(true, |r| record.region.covers(r))
}

pub fn crop_matches(record: &SchemeRecord, crop: Option<&str>) -> bool {
    crop.map_or(true, |c| record.crops.covers(c))
}

/// Whether any eligibility tag carries a smallholder marker of its own
/// locale.
pub fn is_smallholder_only(record: &SchemeRecord) -> bool {
    record.eligibility_tags.iter().any(|tag| {
        smallholder_markers(tag.locale)
            .iter()
            .any(|marker| contains_ignore_case(&tag.text, marker))
    })
}

/// Landholding predicate. Absent landholding never excludes.
pub fn landholding_permits(record: &SchemeRecord, landholding_ha: Option<f64>) -> bool {
    match landholding_ha {
        Some(ha) if ha > SMALLHOLDER_LIMIT_HA => !is_smallholder_only(record),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annadata_core::{
        CropCoverage, EligibilityTag, LocalizedText, RegionScope, SchemeCategory, SchemeId,
    };

    fn record_with_tags(tags: Vec<EligibilityTag>) -> SchemeRecord {
        SchemeRecord {
            id: SchemeId::new("t").unwrap(),
            name: LocalizedText::new("PM-KISAN Scheme", "पीएम-किसान योजना"),
            description: LocalizedText::new(
                "Direct income support to farmer families",
                "किसान परिवारों को प्रत्यक्ष आय सहायता",
            ),
            benefits: LocalizedText::new("₹6,000", "₹6,000"),
            region: RegionScope::Named("Punjab".to_string()),
            crops: CropCoverage::Listed(vec!["Rice".to_string()]),
            category: SchemeCategory::Subsidy,
            eligibility_tags: tags,
            deadline: None,
        }
    }

    #[test]
    fn contains_ignore_case_basics() {
        assert!(contains_ignore_case("PM-KISAN Scheme", "kisan"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Soil Health", "kisan"));
    }

    #[test]
    fn text_is_locale_scoped() {
        let r = record_with_tags(vec![]);
        assert!(text_matches(&r, "kisan", Locale::En));
        assert!(!text_matches(&r, "kisan", Locale::Hi));
        assert!(text_matches(&r, "किसान", Locale::Hi));
        assert!(!text_matches(&r, "किसान", Locale::En));
    }

    #[test]
    fn text_matches_description() {
        let r = record_with_tags(vec![]);
        assert!(text_matches(&r, "INCOME support", Locale::En));
    }

    #[test]
    fn region_and_crop_are_exact() {
        let r = record_with_tags(vec![]);
        assert!(region_matches(&r, None));
        assert!(region_matches(&r, Some("Punjab")));
        assert!(!region_matches(&r, Some("punjab")));
        assert!(crop_matches(&r, Some("Rice")));
        assert!(!crop_matches(&r, Some("Wheat")));
    }

    #[test]
    fn smallholder_markers_case_insensitive() {
        let r = record_with_tags(vec![EligibilityTag::new("SMALL farmers", Locale::En)]);
        assert!(is_smallholder_only(&r));
        let r = record_with_tags(vec![EligibilityTag::new("Marginal farmers", Locale::En)]);
        assert!(is_smallholder_only(&r));
    }

    #[test]
    fn hindi_markers_only_checked_on_hindi_tags() {
        let hi = record_with_tags(vec![EligibilityTag::new("सीमांत किसान", Locale::Hi)]);
        assert!(is_smallholder_only(&hi));

        // A Hindi marker inside a tag declared English is not a marker.
        let mislabeled = record_with_tags(vec![EligibilityTag::new("सीमांत किसान", Locale::En)]);
        assert!(!is_smallholder_only(&mislabeled));
    }

    #[test]
    fn landholding_limit_is_strict() {
        let r = record_with_tags(vec![EligibilityTag::new("Small farmers", Locale::En)]);
        assert!(landholding_permits(&r, None));
        assert!(landholding_permits(&r, Some(1.5)));
        assert!(landholding_permits(&r, Some(2.0)));
        assert!(!landholding_permits(&r, Some(3.5)));

        let open = record_with_tags(vec![EligibilityTag::new("All farmers", Locale::En)]);
        assert!(landholding_permits(&open, Some(50.0)));
    }

    #[test]
    fn predicate_sets_per_mode() {
        assert!(Predicate::for_mode(MatchMode::Discovery).contains(&Predicate::Text));
        assert!(!Predicate::for_mode(MatchMode::Discovery).contains(&Predicate::Landholding));
        assert!(Predicate::for_mode(MatchMode::Eligibility).contains(&Predicate::Landholding));
        assert!(!Predicate::for_mode(MatchMode::Eligibility).contains(&Predicate::Category));
    }

    #[test]
    fn category_predicate() {
        let r = record_with_tags(vec![]);
        let subsidy = QueryProfile::discovery().with_category(SchemeCategory::Subsidy);
        let loan = QueryProfile::discovery().with_category(SchemeCategory::Loan);
        assert!(Predicate::Category.holds(&r, &subsidy, Locale::En));
        assert!(!Predicate::Category.holds(&r, &loan, Locale::En));
        assert!(Predicate::Category.holds(&r, &QueryProfile::discovery(), Locale::En));
    }
}
