//! # annadata-cli — Command-Line Front End for the Scheme Portal
//!
//! Provides the `annadata` command, running the same match engine as the
//! HTTP service against the builtin catalog or a catalog file.
//!
//! ## Subcommands
//!
//! - `annadata schemes` — Discovery search (text, region, crop, category).
//! - `annadata eligibility` — Eligibility check, optionally explained
//!   predicate by predicate.
//! - `annadata catalog validate` — Report every problem in a catalog file.
//! - `annadata catalog facets` — Filter options the catalog offers.
//!
//! ```bash
//! annadata schemes kisan --lang hi
//! annadata eligibility --region Punjab --landholding 3.5 --explain
//! annadata --catalog schemes.yaml catalog facets --json
//! ```
//!
//! Handlers write to any [`std::io::Write`] and return a process exit code,
//! so they are tested without spawning the binary.

pub mod catalog;
pub mod eligibility;
pub mod output;
pub mod schemes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use annadata_catalog::SchemeCatalog;
use annadata_core::Locale;
use annadata_match::parse_locale;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Catalog file; the builtin catalog when unset.
    pub catalog: Option<PathBuf>,
    /// Raw `--lang` value.
    pub lang: Option<String>,
    /// Emit JSON instead of text.
    pub json: bool,
}

impl GlobalOpts {
    pub fn locale(&self) -> Locale {
        parse_locale(self.lang.as_deref())
    }

    /// Load the catalog these options point at.
    pub fn load_catalog(&self) -> Result<SchemeCatalog> {
        match &self.catalog {
            Some(path) => SchemeCatalog::load(path)
                .with_context(|| format!("failed to load catalog: {}", path.display())),
            None => SchemeCatalog::builtin().context("builtin catalog is invalid"),
        }
    }
}
