//! I/O module
//!
//! Reading labeled records from FASTA files and generating synthetic
//! input for testing.

pub mod fasta;
pub mod generate;

/// Convenience re-exports
pub use fasta::{read_fasta, read_fasta_string, read_sequences, write_fasta};
pub use generate::{generate_records, write_synthetic_fasta, GeneratorConfig};
