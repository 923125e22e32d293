//! Catalog-specific error types.
//!
//! Structured errors for loading and validating scheme catalogs. Parse
//! errors carry the source path so a bad catalog file can be located
//! from the log line alone.

use std::path::PathBuf;

use annadata_core::{Locale, SchemeId};
use thiserror::Error;

/// Errors that can occur while building a [`SchemeCatalog`](crate::SchemeCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A catalog file was not found.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file extension does not name a supported format.
    #[error("unsupported catalog format at {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Two records share one identifier.
    #[error("duplicate scheme id {id:?}")]
    DuplicateId { id: SchemeId },

    /// A required localized field is blank in one locale.
    #[error("scheme {id:?}: field {field} is empty for locale {locale}")]
    EmptyField {
        id: SchemeId,
        field: &'static str,
        locale: Locale,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
