//! # Eligibility CLI — The self-check form on the command line.
//!
//! ```bash
//! annadata eligibility --region Maharashtra --landholding 1.5
//! annadata eligibility --landholding 3.5 --explain
//! ```
//!
//! `--explain` prints every catalog record with the outcome of each
//! eligibility predicate, matched or not.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use annadata_core::Locale;
use annadata_match::{explain, MatchEngine, MatchMode, PredicateOutcome, QueryForm};

use crate::output::{write_json, write_match_result};
use crate::GlobalOpts;

/// Eligibility check arguments.
#[derive(Args, Debug, Default)]
pub struct EligibilityArgs {
    /// Region (state) name.
    #[arg(long)]
    pub region: Option<String>,

    /// Crop name.
    #[arg(long)]
    pub crop: Option<String>,

    /// Landholding in hectares.
    #[arg(long)]
    pub landholding: Option<String>,

    /// Annual income in rupees. Recorded, not used for matching.
    #[arg(long)]
    pub income: Option<String>,

    /// Show the outcome of every predicate for every scheme.
    #[arg(long)]
    pub explain: bool,
}

impl EligibilityArgs {
    fn to_form(&self, opts: &GlobalOpts) -> QueryForm {
        QueryForm {
            region: self.region.clone(),
            crop: self.crop.clone(),
            landholding: self.landholding.clone(),
            income: self.income.clone(),
            lang: opts.lang.clone(),
            ..QueryForm::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct Explanation {
    id: String,
    name: String,
    matched: bool,
    predicates: Vec<PredicateOutcome>,
}

/// Execute the eligibility subcommand.
pub fn run_eligibility(
    args: &EligibilityArgs,
    opts: &GlobalOpts,
    out: &mut dyn Write,
) -> Result<u8> {
    let engine = MatchEngine::new(opts.load_catalog()?);
    let locale = opts.locale();
    let profile = args.to_form(opts).to_profile(MatchMode::Eligibility);

    if args.explain {
        let explanations: Vec<Explanation> = engine
            .catalog()
            .iter()
            .map(|record| {
                let predicates = explain(record, &profile, locale);
                Explanation {
                    id: record.id.to_string(),
                    name: record.name.get(locale).to_string(),
                    matched: predicates.iter().all(|o| o.holds),
                    predicates,
                }
            })
            .collect();
        return write_explanations(out, &explanations, locale, opts.json).map(|()| 0);
    }

    let result = engine.check_eligibility(&profile, &locale);
    write_match_result(out, &result, opts.json)?;
    Ok(0)
}

fn write_explanations(
    out: &mut dyn Write,
    explanations: &[Explanation],
    locale: Locale,
    json: bool,
) -> Result<()> {
    if json {
        return write_json(out, explanations);
    }
    let (yes, no) = match locale {
        Locale::En => ("eligible", "not eligible"),
        Locale::Hi => ("पात्र", "अपात्र"),
    };
    for e in explanations {
        writeln!(out, "{} ({}): {}", e.name, e.id, if e.matched { yes } else { no })?;
        for outcome in &e.predicates {
            let mark = if outcome.holds { "ok" } else { "FAIL" };
            writeln!(out, "    {:<12} {mark}", outcome.predicate.as_str())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: EligibilityArgs, opts: GlobalOpts) -> String {
        let mut out = Vec::new();
        assert_eq!(run_eligibility(&args, &opts, &mut out).unwrap(), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn large_holding_drops_smallholder_schemes() {
        let args = EligibilityArgs {
            landholding: Some("3.5".into()),
            ..EligibilityArgs::default()
        };
        let text = run(args, GlobalOpts::default());
        assert!(text.starts_with("4 schemes are available for you"));
        assert!(!text.contains("pm-kisan"));
        assert!(!text.contains("namo-shetkari"));
    }

    #[test]
    fn malformed_landholding_is_unset() {
        let args = EligibilityArgs {
            landholding: Some("three acres".into()),
            ..EligibilityArgs::default()
        };
        let text = run(args, GlobalOpts::default());
        assert!(text.starts_with("6 schemes are available for you"));
    }

    #[test]
    fn explain_lists_failing_predicate() {
        let args = EligibilityArgs {
            region: Some("Punjab".into()),
            landholding: Some("5".into()),
            explain: true,
            ..EligibilityArgs::default()
        };
        let text = run(args, GlobalOpts::default());
        assert!(text.contains("PM-KISAN Scheme (pm-kisan): not eligible"));
        assert!(text.contains("Crop Residue Management Scheme (crop-residue-management): eligible"));
        assert!(text.contains("    landholding  FAIL"));
        assert!(text.contains("    region       FAIL"));
    }

    #[test]
    fn explain_json_has_every_record() {
        let args = EligibilityArgs {
            explain: true,
            ..EligibilityArgs::default()
        };
        let opts = GlobalOpts {
            json: true,
            ..GlobalOpts::default()
        };
        let value: serde_json::Value = serde_json::from_str(&run(args, opts)).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r["matched"] == true));
        assert_eq!(records[0]["predicates"][0]["predicate"], "region");
    }
}
