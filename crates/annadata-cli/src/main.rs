//! # annadata CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use annadata_cli::catalog::{run_catalog, CatalogArgs};
use annadata_cli::eligibility::{run_eligibility, EligibilityArgs};
use annadata_cli::schemes::{run_schemes, SchemesArgs};
use annadata_cli::GlobalOpts;

/// Annadata — government scheme discovery for farmers.
///
/// Searches the scheme catalog, checks eligibility against a farmer
/// profile, and validates catalog files. Output is in English or Hindi.
#[derive(Parser, Debug)]
#[command(name = "annadata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog file (YAML or JSON). Defaults to the builtin catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output language: en or hi.
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search schemes by text, region, crop and category.
    Schemes(SchemesArgs),

    /// Check which schemes a farmer may be eligible for.
    Eligibility(EligibilityArgs),

    /// Validate a catalog file or list its facets.
    Catalog(CatalogArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = GlobalOpts {
        catalog: cli.catalog,
        lang: cli.lang,
        json: cli.json,
    };
    let mut stdout = std::io::stdout().lock();

    let result = match &cli.command {
        Commands::Schemes(args) => run_schemes(args, &opts, &mut stdout),
        Commands::Eligibility(args) => run_eligibility(args, &opts, &mut stdout),
        Commands::Catalog(args) => run_catalog(args, &opts, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_schemes_with_filters() {
        let cli = Cli::try_parse_from([
            "annadata", "schemes", "kisan", "--region", "Punjab", "--lang", "hi",
        ])
        .unwrap();
        assert_eq!(cli.lang.as_deref(), Some("hi"));
        if let Commands::Schemes(args) = cli.command {
            assert_eq!(args.query.as_deref(), Some("kisan"));
            assert_eq!(args.region.as_deref(), Some("Punjab"));
        } else {
            panic!("expected schemes");
        }
    }

    #[test]
    fn cli_parse_schemes_id_conflicts_with_query() {
        assert!(Cli::try_parse_from(["annadata", "schemes", "kisan", "--id", "pmfby"]).is_err());
    }

    #[test]
    fn cli_parse_eligibility_explain() {
        let cli = Cli::try_parse_from([
            "annadata",
            "eligibility",
            "--landholding",
            "3.5",
            "--explain",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        if let Commands::Eligibility(args) = cli.command {
            assert!(args.explain);
            assert_eq!(args.landholding.as_deref(), Some("3.5"));
        } else {
            panic!("expected eligibility");
        }
    }

    #[test]
    fn cli_parse_catalog_validate() {
        let cli =
            Cli::try_parse_from(["annadata", "-vv", "catalog", "validate", "schemes.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Catalog(_)));
    }

    #[test]
    fn cli_parse_global_catalog_after_subcommand() {
        let cli = Cli::try_parse_from([
            "annadata",
            "catalog",
            "facets",
            "--catalog",
            "/srv/schemes.json",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("/srv/schemes.json")));
    }
}
