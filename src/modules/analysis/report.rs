//! Report writers
//!
//! CSV mirrors the column layout downstream spreadsheets expect: six
//! fixed columns, then a count and a percent column per residue. Floats
//! are written with two decimals in both formats.

use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use log::info;
use serde::Serializer;

use super::batch::{BatchReport, ReportRow};
use super::{AnalysisError, AnalysisResult};
use crate::engines::core::io::FastWriter;
use crate::engines::EngineResult;
use crate::modules::seq::tables::AMINO_ACIDS;

/// Output format of a report file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Round half away from zero to two decimals; both writers go through this
pub fn round_to_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Serialize an `f64` rounded to two decimals
pub fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to_2(*value))
}

/// Header line for a report over `motif` and `enzyme`
pub fn csv_header(motif: &str, enzyme: &str) -> String {
    let fixed = [
        "Sequence ID".to_string(),
        "Length".to_string(),
        "GC Content (%)".to_string(),
        format!("Motif {} Count", motif),
        format!("{} Site Count", enzyme),
        "Protein Length".to_string(),
    ];
    let residues = AMINO_ACIDS
        .iter()
        .flat_map(|(_, name)| [format!("{} Count", name), format!("{} Percent", name)]);

    fixed.into_iter().chain(residues).join(",")
}

/// One CSV line for `row`, without the newline
pub fn csv_row(row: &ReportRow) -> String {
    let residues = row
        .residues
        .iter()
        .map(|r| format!("{},{:.2}", r.count, round_to_2(r.percent)))
        .join(",");

    format!(
        "{},{},{:.2},{},{},{},{}",
        quote(&row.id),
        row.length,
        round_to_2(row.gc_content),
        row.motif_count,
        row.enzyme_site_count,
        row.protein_length,
        residues
    )
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Write the report as CSV
pub fn write_csv<W: Write>(report: &BatchReport, writer: &mut W) -> EngineResult<()> {
    writeln!(writer, "{}", csv_header(&report.motif, &report.enzyme))?;
    for row in &report.rows {
        writeln!(writer, "{}", csv_row(row))?;
    }
    Ok(())
}

/// Write the rows as a pretty-printed JSON array
pub fn write_json<W: Write>(report: &BatchReport, writer: &mut W) -> EngineResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &report.rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a report file, replacing any previous content
pub fn write_report<P: AsRef<Path>>(report: &BatchReport, path: P, format: ReportFormat) -> AnalysisResult<()> {
    let emit = || -> EngineResult<()> {
        let mut writer = FastWriter::new(path.as_ref(), None)?;
        match format {
            ReportFormat::Csv => write_csv(report, &mut writer)?,
            ReportFormat::Json => write_json(report, &mut writer)?,
        }
        writer.flush()?;
        Ok(())
    };
    emit().map_err(AnalysisError::Emission)?;

    info!("Results saved to {}", path.as_ref().display());
    Ok(())
}
