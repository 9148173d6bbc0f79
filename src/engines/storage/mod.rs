//! Sequence file formats
//!
//! Parsers and writers that move raw labeled records between files and
//! memory. No alphabet validation happens at this layer.

pub mod formats;

pub use formats::{FastaParser, FastaWriter, SequenceRecord};
