//! # Output Rendering
//!
//! Text and JSON renderings shared by the subcommands.

use std::io::Write;

use anyhow::Result;
use annadata_core::{Locale, SchemeRecord};
use annadata_match::{availability_message, MatchMode, MatchResult};
use serde::Serialize;

/// One scheme as listed by the CLI.
#[derive(Debug, Serialize)]
pub struct SchemeLine {
    pub id: String,
    pub name: String,
    pub category: String,
    pub region: String,
    pub benefits: String,
}

impl SchemeLine {
    pub fn render(record: &SchemeRecord, locale: Locale) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.get(locale).to_string(),
            category: record.category.label(locale).to_string(),
            region: record.region.to_string(),
            benefits: record.benefits.get(locale).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub mode: MatchMode,
    pub locale: Locale,
    pub count: usize,
    pub schemes: Vec<SchemeLine>,
}

impl MatchReport {
    pub fn from_result(result: &MatchResult<'_>) -> Self {
        let locale = result.locale();
        Self {
            mode: result.mode(),
            locale,
            count: result.len(),
            schemes: result.iter().map(|r| SchemeLine::render(r, locale)).collect(),
        }
    }
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_scheme(out: &mut dyn Write, line: &SchemeLine) -> Result<()> {
    writeln!(out, "  {:<24} {} [{}, {}]", line.id, line.name, line.category, line.region)?;
    writeln!(out, "  {:<24} {}", "", line.benefits)?;
    Ok(())
}

/// The availability sentence, then one entry per scheme.
pub fn write_match_result(out: &mut dyn Write, result: &MatchResult<'_>, json: bool) -> Result<()> {
    let report = MatchReport::from_result(result);
    if json {
        return write_json(out, &report);
    }
    writeln!(out, "{}", availability_message(report.count, report.locale))?;
    for line in &report.schemes {
        write_scheme(out, line)?;
    }
    Ok(())
}
