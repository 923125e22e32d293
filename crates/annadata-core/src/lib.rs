//! # annadata-core — Foundational Types for the Scheme Portal
//!
//! Every other crate in the workspace depends on `annadata-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One `Locale` enum.** The portal is bilingual (English primary, Hindi
//!    secondary). Every piece of user-facing scheme text is a
//!    [`LocalizedText`] carrying both variants; callers pick one through a
//!    [`LocaleResolver`], never by comparing language strings.
//!
//! 2. **Sentinels are variants, not strings.** The catalog's `"ALL"` region
//!    and crop markers are parsed into [`RegionScope::All`] and
//!    [`CropCoverage::All`] at load time. Matching code never compares
//!    against the literal sentinel.
//!
//! 3. **Validated newtypes.** [`SchemeId`] and [`PhoneNumber`] validate at
//!    construction and at deserialization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `annadata-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod locale;
pub mod scheme;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{PhoneNumber, SchemeId};
pub use locale::{Locale, LocaleResolver, LocalizedText};
pub use scheme::{
    CropCoverage, EligibilityTag, RegionScope, SchemeCategory, SchemeRecord, ALL_SENTINEL,
};
