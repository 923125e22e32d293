//! # Schemes CLI — Discovery search.
//!
//! ```bash
//! annadata schemes                       # the whole catalog
//! annadata schemes kisan --region Punjab
//! annadata schemes --crop Rice --category insurance --lang hi
//! annadata schemes --id pmfby            # one scheme in detail
//! ```

use std::io::Write;

use anyhow::Result;
use clap::Args;

use annadata_core::SchemeId;
use annadata_match::{scheme_summary, MatchEngine, MatchMode, QueryForm};

use crate::output::{write_json, write_match_result, SchemeLine};
use crate::GlobalOpts;

/// Discovery search arguments.
#[derive(Args, Debug, Default)]
pub struct SchemesArgs {
    /// Search text, matched against name and description in the active
    /// language.
    pub query: Option<String>,

    /// Region (state) name.
    #[arg(long)]
    pub region: Option<String>,

    /// Crop name.
    #[arg(long)]
    pub crop: Option<String>,

    /// Category: subsidy, insurance, loan or other.
    #[arg(long)]
    pub category: Option<String>,

    /// Show a single scheme by id instead of searching.
    #[arg(long, conflicts_with_all = ["query", "region", "crop", "category"])]
    pub id: Option<String>,
}

impl SchemesArgs {
    fn to_form(&self, opts: &GlobalOpts) -> QueryForm {
        QueryForm {
            q: self.query.clone(),
            region: self.region.clone(),
            crop: self.crop.clone(),
            category: self.category.clone(),
            lang: opts.lang.clone(),
            ..QueryForm::default()
        }
    }
}

/// Execute the schemes subcommand.
pub fn run_schemes(args: &SchemesArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let engine = MatchEngine::new(opts.load_catalog()?);
    let locale = opts.locale();

    if let Some(raw) = &args.id {
        let id = SchemeId::new(raw.as_str())?;
        let Some(record) = engine.catalog().get(&id) else {
            anyhow::bail!("no scheme with id '{id}'");
        };
        if opts.json {
            write_json(out, &SchemeLine::render(record, locale))?;
        } else {
            writeln!(out, "{}", scheme_summary(record, locale))?;
        }
        return Ok(0);
    }

    let profile = args.to_form(opts).to_profile(MatchMode::Discovery);
    let result = engine.discover(&profile, &locale);
    tracing::debug!(matched = result.len(), "discovery search");
    write_match_result(out, &result, opts.json)?;
    Ok(0)
}
