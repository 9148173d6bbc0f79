//! Analysis module
//!
//! Batch analysis of labeled sequences and report emission.

pub mod batch;
pub mod report;

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::engines::EngineError;
use crate::modules::io::read_fasta;
use crate::modules::seq::{ReferenceTables, SequenceError};

/// Convenience re-exports
pub use batch::{BatchAnalyzer, BatchConfig, BatchPolicy, BatchReport, ReportRow, ResidueStat, SkippedRecord};
pub use report::{write_report, ReportFormat};

/// Error type for batch runs
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read input: {0}")]
    Ingestion(#[source] EngineError),

    #[error("Failed to write report: {0}")]
    Emission(#[source] EngineError),

    #[error("Invalid record '{label}' (record {}): {source}", .index + 1)]
    InvalidRecord {
        label: String,
        /// 0-based position in the input
        index: usize,
        source: SequenceError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] SequenceError),
}

/// Result type for batch runs
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Read a FASTA file, analyze every record and write the report
pub fn analyze_file<P, Q>(
    input: P,
    output: Q,
    tables: &ReferenceTables,
    config: BatchConfig,
    format: ReportFormat,
) -> AnalysisResult<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let analyzer = BatchAnalyzer::new(tables, config)?;

    info!("Analyzing {}", input.as_ref().display());
    let records = read_fasta(input).map_err(AnalysisError::Ingestion)?;
    let report = analyzer.analyze(records)?;

    write_report(&report, output, format)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_analyze_file() -> std::io::Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("input.fasta");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, ">s1\nATGCGAATTC\n>s2\nggcc\n")?;

        let tables = ReferenceTables::default();
        let report = analyze_file(&input, &output, &tables, BatchConfig::default(), ReportFormat::Csv).unwrap();
        assert_eq!(report.rows.len(), 2);

        let csv = std::fs::read_to_string(&output)?;
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.lines().nth(2).unwrap().starts_with("\"s2\",4,100.00,"));
        Ok(())
    }

    #[test]
    fn test_missing_input_is_ingestion_failure() {
        let dir = tempdir().unwrap();
        let tables = ReferenceTables::default();
        let result = analyze_file(
            dir.path().join("missing.fasta"),
            dir.path().join("out.csv"),
            &tables,
            BatchConfig::default(),
            ReportFormat::Csv,
        );
        assert!(matches!(result, Err(AnalysisError::Ingestion(_))));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_non_utf8_record_follows_batch_policy() -> std::io::Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("latin1.fasta");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, b">good\nACGT\n>bad\nAC\xE9T\n>also\nGG\n")?;
        let tables = ReferenceTables::default();

        let skip = BatchConfig::default().with_policy(BatchPolicy::SkipInvalid);
        let report = analyze_file(&input, &output, &tables, skip, ReportFormat::Csv).unwrap();
        let ids: Vec<&str> = report.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "also"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].label, "bad");

        match analyze_file(&input, &output, &tables, BatchConfig::default(), ReportFormat::Csv) {
            Err(AnalysisError::InvalidRecord { label, index, source }) => {
                assert_eq!(label, "bad");
                assert_eq!(index, 1);
                assert!(matches!(
                    source,
                    SequenceError::InvalidAlphabet { symbol: '\u{FFFD}', position: 2 }
                ));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_invalid_record_message() {
        let err = AnalysisError::InvalidRecord {
            label: "seq7".to_string(),
            index: 6,
            source: SequenceError::InvalidAlphabet { symbol: 'X', position: 3 },
        };
        assert_eq!(
            err.to_string(),
            "Invalid record 'seq7' (record 7): Invalid nucleotide 'X' at position 3"
        );
    }
}
