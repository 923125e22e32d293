//! # API Route Modules
//!
//! - `schemes` — discovery search, single scheme, filter facets.
//! - `eligibility` — the eligibility self-check.
//! - `alerts` — alert feed and SMS opt-in.
//! - `news` — the rotating headline.

pub mod alerts;
pub mod eligibility;
pub mod news;
pub mod schemes;
