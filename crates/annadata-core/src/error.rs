//! # Error Types
//!
//! Validation errors raised when constructing core types from untrusted
//! input (catalog files, HTTP parameters, CLI flags). All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A value failed validation at construction or deserialization time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Scheme identifiers must be non-empty.
    #[error("scheme id must not be empty")]
    EmptySchemeId,

    /// Region names must be non-empty.
    #[error("region name must not be empty")]
    EmptyRegion,

    /// Crop names must be non-empty.
    #[error("crop name must not be empty")]
    EmptyCrop,

    /// Locale tag not recognized.
    #[error("unknown locale {0:?} (expected \"en\" or \"hi\")")]
    UnknownLocale(String),

    /// Scheme category not recognized.
    #[error("unknown scheme category {0:?} (expected subsidy, insurance, loan or other)")]
    UnknownCategory(String),

    /// Phone number is not a 10-digit Indian mobile number.
    #[error("invalid phone number {0:?}: expected 10 digits")]
    InvalidPhoneNumber(String),
}
