//! # Catalog Validation Rules
//!
//! ## Validation Layers
//!
//! 1. **Structural validation**: the document parses, every record
//!    deserializes (ids non-empty, regions and crops well-formed, category
//!    known).
//! 2. **Catalog integrity**: ids unique; `name` and `description` present
//!    in every locale.
//! 3. **Advisory checks** (warnings only): records that can never match a
//!    crop-filtered query, records without eligibility tags.
//!
//! Layers 1 and 2 are enforced by [`SchemeCatalog`](crate::SchemeCatalog)
//! construction. [`validate_catalog_file`] runs all three and reports every
//! finding instead of stopping at the first.

use std::collections::BTreeSet;
use std::path::Path;

use annadata_core::{CropCoverage, SchemeRecord};
use serde::Serialize;

use crate::catalog::read_document;
use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Validation Results
// ---------------------------------------------------------------------------

/// Result of validating a catalog file.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogValidationReport {
    /// Whether the catalog would load.
    pub is_valid: bool,
    /// Number of scheme records read (zero if the file did not parse).
    pub scheme_count: usize,
    /// Validation errors, if any.
    pub errors: Vec<String>,
    /// Validation warnings (non-fatal).
    pub warnings: Vec<String>,
}

impl CatalogValidationReport {
    fn ok(scheme_count: usize) -> Self {
        Self {
            is_valid: true,
            scheme_count,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn fail(error: String) -> Self {
        Self {
            is_valid: false,
            scheme_count: 0,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Add an error. Marks the report invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning (does not affect validity).
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

// ---------------------------------------------------------------------------
// Integrity checks
// ---------------------------------------------------------------------------

/// Every integrity violation in `records`, in catalog order.
pub fn integrity_errors(records: &[SchemeRecord]) -> Vec<CatalogError> {
    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();

    for record in records {
        if !seen.insert(&record.id) {
            errors.push(CatalogError::DuplicateId {
                id: record.id.clone(),
            });
        }
        for (field, text) in [("name", &record.name), ("description", &record.description)] {
            for locale in text.missing_locales() {
                errors.push(CatalogError::EmptyField {
                    id: record.id.clone(),
                    field,
                    locale,
                });
            }
        }
    }
    errors
}

/// Advisory findings for `records`. These never prevent loading.
pub fn advisory_warnings(records: &[SchemeRecord]) -> Vec<String> {
    let mut warnings = Vec::new();
    for record in records {
        if matches!(&record.crops, CropCoverage::Listed(crops) if crops.is_empty()) {
            warnings.push(format!(
                "scheme {}: empty crop list, never matches a crop filter",
                record.id
            ));
        }
        if record.eligibility_tags.is_empty() {
            warnings.push(format!("scheme {}: no eligibility tags", record.id));
        }
    }
    warnings
}

/// Validate a catalog file, collecting every finding.
///
/// Never fails: a file that cannot be read or parsed produces an invalid
/// report carrying the parse error.
pub fn validate_catalog_file(path: &Path) -> CatalogValidationReport {
    let document = match read_document(path) {
        Ok(doc) => doc,
        Err(e) => return CatalogValidationReport::fail(e.to_string()),
    };

    let mut report = CatalogValidationReport::ok(document.schemes.len());
    for error in integrity_errors(&document.schemes) {
        report.add_error(error.to_string());
    }
    for warning in advisory_warnings(&document.schemes) {
        report.add_warning(warning);
    }

    tracing::debug!(
        path = %path.display(),
        schemes = report.scheme_count,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated scheme catalog"
    );
    report
}
