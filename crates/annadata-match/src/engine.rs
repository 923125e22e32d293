//! # Match Engine
//!
//! Evaluates a [`QueryProfile`] against a catalog slice and returns the
//! matching records in catalog order.
//!
//! ## Determinism
//!
//! Evaluation is a pure, stable filter: given the same catalog, query and
//! locale, the result is identical, including order. There is no ranking
//! and no scoring. Records are returned by reference and never copied.

use annadata_catalog::SchemeCatalog;
use annadata_core::{Locale, LocaleResolver, SchemeId, SchemeRecord};
use serde::Serialize;

use crate::predicate::Predicate;
use crate::query::{MatchMode, QueryProfile};

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

/// The records that matched one evaluation, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    mode: MatchMode,
    locale: Locale,
    records: Vec<&'a SchemeRecord>,
}

impl<'a> MatchResult<'a> {
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The locale text predicates were evaluated in.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn records(&self) -> &[&'a SchemeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SchemeRecord> + '_ {
        self.records.iter().copied()
    }

    /// Ids of the matched records, in order.
    pub fn ids(&self) -> Vec<&'a SchemeId> {
        self.records.iter().map(|r| &r.id).collect()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Whether `record` satisfies every predicate of the query's mode.
pub fn matches(record: &SchemeRecord, query: &QueryProfile, locale: Locale) -> bool {
    Predicate::for_mode(query.mode())
        .iter()
        .all(|p| p.holds(record, query, locale))
}

/// Filter `catalog` by `query`, reading localized text in the locale that
/// `resolver` reports as active.
pub fn evaluate<'a, R>(catalog: &'a [SchemeRecord], query: &QueryProfile, resolver: &R) -> MatchResult<'a>
where
    R: LocaleResolver + ?Sized,
{
    let locale = resolver.active_locale();
    let records = catalog
        .iter()
        .filter(|record| matches(record, query, locale))
        .collect();
    MatchResult {
        mode: query.mode(),
        locale,
        records,
    }
}

/// Outcome of one predicate for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredicateOutcome {
    pub predicate: Predicate,
    pub holds: bool,
}

/// Per-predicate outcomes for `record`, in evaluation order. The record
/// matches iff every outcome holds.
pub fn explain(record: &SchemeRecord, query: &QueryProfile, locale: Locale) -> Vec<PredicateOutcome> {
    Predicate::for_mode(query.mode())
        .iter()
        .map(|&predicate| PredicateOutcome {
            predicate,
            holds: predicate.holds(record, query, locale),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MatchEngine
// ---------------------------------------------------------------------------

/// A handle owning a catalog snapshot. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    catalog: SchemeCatalog,
}

impl MatchEngine {
    pub fn new(catalog: SchemeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    /// Evaluate `query` under discovery rules.
    pub fn discover<R>(&self, query: &QueryProfile, resolver: &R) -> MatchResult<'_>
    where
        R: LocaleResolver + ?Sized,
    {
        self.run(query, MatchMode::Discovery, resolver)
    }

    /// Evaluate `profile` under eligibility rules.
    pub fn check_eligibility<R>(&self, profile: &QueryProfile, resolver: &R) -> MatchResult<'_>
    where
        R: LocaleResolver + ?Sized,
    {
        self.run(profile, MatchMode::Eligibility, resolver)
    }

    fn run<R>(&self, query: &QueryProfile, mode: MatchMode, resolver: &R) -> MatchResult<'_>
    where
        R: LocaleResolver + ?Sized,
    {
        let result = if query.mode() == mode {
            evaluate(self.catalog.records(), query, resolver)
        } else {
            evaluate(self.catalog.records(), &query.clone().in_mode(mode), resolver)
        };
        tracing::debug!(
            mode = %mode,
            locale = %result.locale(),
            matched = result.len(),
            total = self.catalog.len(),
            "evaluated scheme query"
        );
        result
    }
}
