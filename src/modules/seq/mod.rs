//! Sequence module
//!
//! Alphabet validation, the validated `DnaSequence` record and the
//! reference tables its analyses consult.

pub mod alphabet;
pub mod sequence;
pub mod tables;

/// Convenience re-exports
pub use sequence::{BaseComposition, DnaSequence, SequenceError, SequenceResult};
pub use tables::{CodonMeaning, EnzymeTable, GeneticCode, ReferenceTables};
