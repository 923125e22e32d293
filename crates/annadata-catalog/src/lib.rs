//! # annadata-catalog — Scheme Catalog
//!
//! The catalog is the read-only collection of government schemes the
//! match engine filters. It is loaded once (from a YAML or JSON file, or
//! from the builtin document compiled into the binary), validated, and
//! then shared by reference for the lifetime of the process.
//!
//! - **Loading** ([`catalog`]): [`SchemeCatalog::load`],
//!   [`SchemeCatalog::builtin`] and the `from_*_str` constructors.
//!
//! - **Validation** ([`validation`]): id uniqueness and localized-field
//!   completeness on construction; a collecting validator for the
//!   `catalog validate` CLI command.
//!
//! ## Crate Policy
//!
//! - Construction never panics; every violation is a [`CatalogError`].
//! - A constructed catalog is immutable.

pub mod catalog;
pub mod error;
pub mod validation;

// Re-export primary types.
pub use catalog::{CatalogDocument, CatalogFacets, SchemeCatalog};
pub use error::{CatalogError, CatalogResult};
pub use validation::{validate_catalog_file, CatalogValidationReport};
