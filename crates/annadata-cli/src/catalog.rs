//! # Catalog CLI — Validate catalog files and list their facets.
//!
//! ```bash
//! annadata catalog validate data/schemes.yaml
//! annadata --catalog data/schemes.yaml catalog facets
//! ```
//!
//! `validate` exits with status 1 when the file would not load.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use annadata_catalog::validate_catalog_file;

use crate::output::write_json;
use crate::GlobalOpts;

/// Catalog subcommand arguments.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Report every error and warning in a catalog file.
    Validate {
        /// Path to a YAML or JSON catalog.
        path: PathBuf,
    },

    /// List the regions, crops and categories of the catalog.
    Facets,
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    match &args.command {
        CatalogCommand::Validate { path } => run_validate(path, opts, out),
        CatalogCommand::Facets => run_facets(opts, out),
    }
}

fn run_validate(path: &Path, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let report = validate_catalog_file(path);
    tracing::info!(
        path = %path.display(),
        valid = report.is_valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated catalog"
    );

    if opts.json {
        write_json(out, &report)?;
    } else {
        let verdict = if report.is_valid { "OK" } else { "INVALID" };
        writeln!(
            out,
            "{}: {verdict} ({} schemes)",
            path.display(),
            report.scheme_count
        )?;
        for e in &report.errors {
            writeln!(out, "  error:   {e}")?;
        }
        for w in &report.warnings {
            writeln!(out, "  warning: {w}")?;
        }
    }

    Ok(if report.is_valid { 0 } else { 1 })
}

fn run_facets(opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let facets = opts.load_catalog()?.facets();
    if opts.json {
        write_json(out, &facets)?;
        return Ok(0);
    }
    let locale = opts.locale();
    let categories: Vec<&str> = facets.categories.iter().map(|c| c.label(locale)).collect();
    writeln!(out, "regions:    {}", facets.regions.join(", "))?;
    writeln!(out, "crops:      {}", facets.crops.join(", "))?;
    writeln!(out, "categories: {}", categories.join(", "))?;
    Ok(0)
}
