//! # Middleware
//!
//! - `metrics` — atomic request/error counters.

pub mod metrics;
