//! Validated nucleotide sequence
//!
//! `DnaSequence` owns an uppercase, alphabet-checked base string and
//! exposes every derived analysis as a pure function of it.

use std::fmt;

use thiserror::Error;

use super::alphabet;
use super::tables::{CodonMeaning, EnzymeTable, GeneticCode, UNKNOWN_RESIDUE};
use crate::engines::compute::{string_ops, ComputeError};
use crate::engines::EngineError;

/// Error type for sequence operations
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Invalid nucleotide '{symbol}' at position {position}")]
    InvalidAlphabet { symbol: char, position: usize },

    #[error("Unknown enzyme: {0}")]
    UnknownEnzyme(String),

    #[error("Motif cannot be empty")]
    EmptyPattern,

    #[error("Invalid codon: {0}")]
    InvalidCodon(String),

    #[error("Residue '{0}' is not a reported amino acid")]
    InvalidResidue(char),

    #[error("Genetic code must define all 64 codons, got {0}")]
    IncompleteGeneticCode(usize),

    #[error("Compute error: {0}")]
    Compute(#[from] ComputeError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type for sequence operations
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Per-symbol counts of a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseComposition {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    pub n: usize,
}

impl BaseComposition {
    /// Sum of all counts; equals the sequence length
    pub fn total(&self) -> usize {
        self.a + self.c + self.g + self.t + self.n
    }
}

/// An immutable, validated DNA sequence with its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaSequence {
    label: String,
    bases: Vec<u8>,
}

impl DnaSequence {
    /// Uppercase and validate `raw`
    ///
    /// Fails with `InvalidAlphabet` naming the first byte outside
    /// `ACGTN`. An empty input is a valid, empty sequence.
    pub fn new(label: impl Into<String>, raw: impl AsRef<[u8]>) -> SequenceResult<Self> {
        let bases = alphabet::normalize_and_validate(raw.as_ref())?;
        Ok(Self {
            label: label.into(),
            bases,
        })
    }

    /// Get the label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the bases
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// Get the bases as a string slice
    pub fn as_str(&self) -> &str {
        // Only ACGTN can be stored
        std::str::from_utf8(&self.bases).unwrap_or_default()
    }

    /// Get the sequence length
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Number of positions holding `symbol` (case-insensitive)
    pub fn count_base(&self, symbol: char) -> SequenceResult<usize> {
        let base = alphabet::normalize_symbol(symbol)?;
        Ok(string_ops::count_byte(&self.bases, base))
    }

    /// Fraction of positions holding `symbol`; 0.0 for an empty sequence
    pub fn frequency(&self, symbol: char) -> SequenceResult<f64> {
        let count = self.count_base(symbol)?;
        if self.is_empty() {
            return Ok(0.0);
        }
        Ok(count as f64 / self.len() as f64)
    }

    /// Counts of every alphabet symbol in one pass
    pub fn base_composition(&self) -> BaseComposition {
        let [a, c, g, t, n] = string_ops::count_bases(&self.bases);
        BaseComposition { a, c, g, t, n }
    }

    /// Percentage of G and C over the full length; 0.0 when empty
    pub fn gc_content(&self) -> f64 {
        string_ops::gc_content(&self.bases)
    }

    /// Start offsets of every, possibly overlapping, occurrence of `pattern`
    ///
    /// The pattern is uppercased first. Symbols outside the alphabet
    /// simply never match.
    pub fn find_motif(&self, pattern: &str) -> SequenceResult<Vec<usize>> {
        if pattern.is_empty() {
            return Err(SequenceError::EmptyPattern);
        }
        let pattern = alphabet::normalize(pattern.as_bytes());
        Ok(string_ops::kmp_search(&self.bases, &pattern)?)
    }

    /// Watson-Crick complement, same label and length
    pub fn complement(&self) -> Self {
        Self {
            label: self.label.clone(),
            bases: string_ops::complement_dna(&self.bases),
        }
    }

    /// Complement read in reverse
    pub fn reverse_complement(&self) -> Self {
        Self {
            label: self.label.clone(),
            bases: string_ops::reverse_complement_dna(&self.bases),
        }
    }

    /// Offsets of the recognition site of `enzyme`
    pub fn find_restriction_sites(&self, enzymes: &EnzymeTable, enzyme: &str) -> SequenceResult<Vec<usize>> {
        let motif = enzymes
            .motif(enzyme)
            .ok_or_else(|| SequenceError::UnknownEnzyme(enzyme.to_string()))?;
        self.find_motif(motif)
    }

    /// Translate reading frame 0 up to the first stop codon
    ///
    /// A trailing partial codon is dropped. Codons the table does not
    /// define (any containing N) become `X` and translation continues.
    pub fn translate(&self, code: &GeneticCode) -> String {
        let mut protein = String::with_capacity(self.len() / 3);

        for codon in self.bases.chunks_exact(3) {
            match code.lookup(codon) {
                Some(CodonMeaning::Stop) => break,
                Some(CodonMeaning::AminoAcid(aa)) => protein.push(aa as char),
                None => protein.push(UNKNOWN_RESIDUE as char),
            }
        }

        protein
    }
}

impl fmt::Display for DnaSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
