//! # annadata-match — Scheme Match Engine
//!
//! Filters the scheme catalog against a farmer's query. Two modes share
//! one predicate set:
//!
//! - **Discovery**: free-text search plus region, crop and category
//!   filters. Powers the scheme browser.
//!
//! - **Eligibility**: region, crop and landholding. Powers the
//!   self-check form.
//!
//! ## Architecture
//!
//! - **Query** (`query.rs`): the immutable [`QueryProfile`].
//! - **Normalize** (`normalize.rs`): raw form input to profile.
//! - **Predicate** (`predicate.rs`): the individual filter conditions.
//! - **Engine** (`engine.rs`): [`evaluate`], [`explain`] and the
//!   [`MatchEngine`] handle.
//! - **Announce** (`announce.rs`): spoken-result sentences and the
//!   [`AnnounceSink`] contract.
//!
//! ## Crate Policy
//!
//! - Evaluation is total. Unset constraints never exclude, and malformed
//!   input is normalized away before it reaches a predicate.
//! - Output order is catalog order. Nothing is ranked.

pub mod announce;
pub mod engine;
pub mod normalize;
pub mod predicate;
pub mod query;

pub use announce::{
    announce_result, announce_scheme, availability_message, scheme_summary, AnnounceSink,
    SilentSink, TracingSink,
};
pub use engine::{evaluate, explain, matches, MatchEngine, MatchResult, PredicateOutcome};
pub use normalize::{parse_locale, QueryForm};
pub use predicate::{Predicate, SMALLHOLDER_LIMIT_HA};
pub use query::{MatchMode, QueryProfile};
