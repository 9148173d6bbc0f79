//! Nucleotide sequence analysis
//!
//! Validated DNA sequences with composition, motif search, restriction
//! site lookup and translation, plus a batch analyzer that turns a FASTA
//! file into a per-record report.

pub mod engines;
pub mod logger;
pub mod modules;

pub use modules::analysis::{
    analyze_file, AnalysisError, AnalysisResult, BatchAnalyzer, BatchConfig, BatchPolicy, BatchReport,
    ReportFormat, ReportRow,
};
pub use modules::seq::{DnaSequence, EnzymeTable, GeneticCode, ReferenceTables, SequenceError, SequenceResult};
