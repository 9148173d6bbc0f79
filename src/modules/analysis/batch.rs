//! Batch analysis
//!
//! Turns an ordered list of raw records into one report row per record.
//! Rows always come out in input order.

use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::report::round2;
use super::{AnalysisError, AnalysisResult};
use crate::engines::storage::SequenceRecord;
use crate::modules::seq::tables::AMINO_ACIDS;
use crate::modules::seq::{DnaSequence, ReferenceTables, SequenceError, SequenceResult};

/// What to do when a record fails alphabet validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPolicy {
    /// Abort the whole batch on the first invalid record
    #[default]
    FailFast,
    /// Log the record, leave it out of the rows and keep going
    SkipInvalid,
}

/// Settings for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Motif counted in every record
    pub motif: String,
    /// Enzyme whose sites are counted in every record
    pub enzyme: String,
    pub policy: BatchPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            motif: "ATGC".to_string(),
            enzyme: "EcoRI".to_string(),
            policy: BatchPolicy::FailFast,
        }
    }
}

impl BatchConfig {
    pub fn with_motif(mut self, motif: &str) -> Self {
        self.motif = motif.to_string();
        self
    }

    pub fn with_enzyme(mut self, enzyme: &str) -> Self {
        self.enzyme = enzyme.to_string();
        self
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Count and share of one residue in a translated protein
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueStat {
    pub symbol: char,
    pub name: &'static str,
    pub count: usize,
    /// Percent of protein length; 0.0 for an empty protein
    #[serde(serialize_with = "round2")]
    pub percent: f64,
}

/// Analysis results for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub length: usize,
    #[serde(serialize_with = "round2")]
    pub gc_content: f64,
    pub motif_count: usize,
    pub enzyme_site_count: usize,
    pub protein_length: usize,
    /// One entry per residue in `AMINO_ACIDS` order
    pub residues: Vec<ResidueStat>,
}

/// A record left out under `BatchPolicy::SkipInvalid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// 0-based position in the input
    pub index: usize,
    pub label: String,
    pub reason: String,
}

/// Output of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub motif: String,
    pub enzyme: String,
    pub rows: Vec<ReportRow>,
    pub skipped: Vec<SkippedRecord>,
}

/// Runs the fixed set of analyses over a batch of records
pub struct BatchAnalyzer<'a> {
    tables: &'a ReferenceTables,
    config: BatchConfig,
}

impl<'a> BatchAnalyzer<'a> {
    /// Check `config` against `tables` before any record is touched
    pub fn new(tables: &'a ReferenceTables, mut config: BatchConfig) -> AnalysisResult<Self> {
        if config.motif.is_empty() {
            return Err(AnalysisError::Config(SequenceError::EmptyPattern));
        }
        if !tables.enzymes.contains(&config.enzyme) {
            debug!("Known enzymes: {}", tables.enzymes.names().join(", "));
            return Err(AnalysisError::Config(SequenceError::UnknownEnzyme(config.enzyme)));
        }
        config.motif = config.motif.to_ascii_uppercase();

        Ok(Self { tables, config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Analyze one validated sequence
    pub fn analyze_sequence(&self, seq: &DnaSequence) -> SequenceResult<ReportRow> {
        let motif_count = seq.find_motif(&self.config.motif)?.len();
        let enzyme_site_count = seq
            .find_restriction_sites(&self.tables.enzymes, &self.config.enzyme)?
            .len();
        let protein = seq.translate(&self.tables.genetic_code);

        Ok(ReportRow {
            id: seq.label().to_string(),
            length: seq.len(),
            gc_content: seq.gc_content(),
            motif_count,
            enzyme_site_count,
            protein_length: protein.len(),
            residues: residue_stats(&protein),
        })
    }

    /// Validate and analyze every record, in order
    pub fn analyze<I>(&self, records: I) -> AnalysisResult<BatchReport>
    where
        I: IntoIterator<Item = SequenceRecord>,
    {
        let mut rows = Vec::new();
        let mut skipped = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let seq = match DnaSequence::new(record.id.as_str(), &record.sequence) {
                Ok(seq) => seq,
                Err(source) => match self.config.policy {
                    BatchPolicy::FailFast => {
                        return Err(AnalysisError::InvalidRecord {
                            label: record.id,
                            index,
                            source,
                        });
                    }
                    BatchPolicy::SkipInvalid => {
                        warn!("Skipping record '{}': {}", record.id, source);
                        skipped.push(SkippedRecord {
                            index,
                            label: record.id,
                            reason: source.to_string(),
                        });
                        continue;
                    }
                },
            };

            let row = self
                .analyze_sequence(&seq)
                .map_err(|source| AnalysisError::InvalidRecord {
                    label: seq.label().to_string(),
                    index,
                    source,
                })?;
            debug!(
                "{}: {} bp, GC {:.2}%, protein {} aa",
                row.id, row.length, row.gc_content, row.protein_length
            );
            rows.push(row);
        }

        info!("Analyzed {} records ({} skipped)", rows.len(), skipped.len());

        Ok(BatchReport {
            motif: self.config.motif.clone(),
            enzyme: self.config.enzyme.clone(),
            rows,
            skipped,
        })
    }
}

/// Per-residue counts and percentages in report column order
pub fn residue_stats(protein: &str) -> Vec<ResidueStat> {
    let counts = protein.bytes().counts();
    let total = protein.len();

    AMINO_ACIDS
        .iter()
        .map(|&(symbol, name)| {
            let count = counts.get(&symbol).copied().unwrap_or(0);
            let percent = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            ResidueStat {
                symbol: symbol as char,
                name,
                count,
                percent,
            }
        })
        .collect()
}
