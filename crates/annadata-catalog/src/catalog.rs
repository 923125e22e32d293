//! # Scheme Catalog
//!
//! An immutable, validated snapshot of scheme records. Cloning a
//! [`SchemeCatalog`] clones an `Arc`; the records themselves are shared
//! read-only between every holder and never copied during matching.
//!
//! ## Document Format
//!
//! ```yaml
//! version: "1"
//! schemes:
//!   - id: pm-kisan
//!     name: { en: PM-KISAN Scheme, hi: पीएम-किसान योजना }
//!     description: { en: ..., hi: ... }
//!     benefits: { en: ..., hi: ... }
//!     region: ALL
//!     crops: [ALL]
//!     category: subsidy
//!     eligibility_tags: [Small and marginal farmers]
//!     deadline: "2024-03-31"
//! ```
//!
//! The same structure is accepted as JSON.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use annadata_core::{SchemeCategory, SchemeId, SchemeRecord};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::validation::integrity_errors;

const BUILTIN_CATALOG: &str = include_str!("../data/schemes.yaml");

/// The on-disk catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Document format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Scheme records in display order.
    #[serde(default)]
    pub schemes: Vec<SchemeRecord>,
}

fn default_version() -> String {
    "1".to_string()
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> CatalogResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read and parse a catalog document without integrity checks.
pub(crate) fn read_document(path: &Path) -> CatalogResult<CatalogDocument> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(e)
        }
    })?;
    match format {
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| CatalogError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| CatalogError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ---------------------------------------------------------------------------
// SchemeCatalog
// ---------------------------------------------------------------------------

/// A validated, read-only scheme catalog.
#[derive(Debug, Clone)]
pub struct SchemeCatalog {
    records: Arc<[SchemeRecord]>,
}

impl SchemeCatalog {
    /// Build a catalog from records, enforcing id uniqueness and non-empty
    /// localized names and descriptions.
    ///
    /// # Errors
    ///
    /// Returns the first integrity violation found, in catalog order.
    pub fn from_records(records: Vec<SchemeRecord>) -> CatalogResult<Self> {
        if let Some(err) = integrity_errors(&records).into_iter().next() {
            return Err(err);
        }
        Ok(Self {
            records: records.into(),
        })
    }

    /// Parse a YAML catalog document.
    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_yaml::from_str(content)?;
        Self::from_records(document.schemes)
    }

    /// Parse a JSON catalog document.
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        Self::from_records(document.schemes)
    }

    /// Load a catalog file; the format follows the extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let document = read_document(path)?;
        let catalog = Self::from_records(document.schemes)?;
        tracing::info!(
            path = %path.display(),
            version = %document.version,
            schemes = catalog.len(),
            "loaded scheme catalog"
        );
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &SchemeId) -> Option<&SchemeRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[SchemeRecord] {
        &self.records
    }

    /// Iterate over records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, SchemeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The distinct filter values present in the catalog.
    pub fn facets(&self) -> CatalogFacets {
        let mut regions = BTreeSet::new();
        let mut crops = BTreeSet::new();
        let mut categories = BTreeSet::new();
        for record in self.records.iter() {
            if !record.region.is_all() {
                regions.insert(record.region.as_str().to_string());
            }
            crops.extend(record.crops.listed().iter().cloned());
            categories.insert(record.category);
        }
        CatalogFacets {
            regions: regions.into_iter().collect(),
            crops: crops.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SchemeCatalog {
    type Item = &'a SchemeRecord;
    type IntoIter = std::slice::Iter<'a, SchemeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Filter options offered to the user: named regions and listed crops in
/// sorted order, categories in canonical order. Sentinels are not listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFacets {
    pub regions: Vec<String>,
    pub crops: Vec<String>,
    pub categories: Vec<SchemeCategory>,
}
