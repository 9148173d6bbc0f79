//! FASTA file access
//!
//! Thin wrappers over the engine parser. Records come back raw so that
//! validation policy stays with the caller.

use std::path::Path;

use crate::engines::storage::{FastaParser, FastaWriter, SequenceRecord};
use crate::engines::EngineResult;
use crate::modules::seq::{DnaSequence, SequenceResult};

/// Read raw records from a FASTA file, in file order
pub fn read_fasta<P: AsRef<Path>>(path: P) -> EngineResult<Vec<SequenceRecord>> {
    FastaParser::new().parse_file(path)
}

/// Read raw records from FASTA text
pub fn read_fasta_string(content: &str) -> EngineResult<Vec<SequenceRecord>> {
    FastaParser::new().parse_string(content)
}

/// Read and validate every record, failing on the first invalid one
pub fn read_sequences<P: AsRef<Path>>(path: P) -> SequenceResult<Vec<DnaSequence>> {
    read_fasta(path)?
        .into_iter()
        .map(|record| DnaSequence::new(record.id, record.sequence))
        .collect()
}

/// Write records to a FASTA file with the given line width (0 = unwrapped)
pub fn write_fasta<P: AsRef<Path>>(records: &[SequenceRecord], path: P, line_width: usize) -> EngineResult<()> {
    FastaWriter::with_line_width(line_width).write_file(records, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::seq::SequenceError;
    use tempfile::tempdir;

    #[test]
    fn test_read_write_fasta() -> std::io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("roundtrip.fasta");

        let records = vec![
            SequenceRecord::new("seq1", b"ACGTACGT".to_vec()),
            SequenceRecord::new("seq2", b"GTACGTAC".to_vec()),
        ];
        write_fasta(&records, &path, 60).unwrap();

        assert_eq!(read_fasta(&path).unwrap(), records);
        Ok(())
    }

    #[test]
    fn test_read_sequences_validates() -> std::io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("input.fasta");

        std::fs::write(&path, ">ok\nacgt\n")?;
        let seqs = read_sequences(&path).unwrap();
        assert_eq!(seqs[0].as_str(), "ACGT");

        std::fs::write(&path, ">ok\nACGT\n>bad\nACXT\n")?;
        assert!(matches!(
            read_sequences(&path),
            Err(SequenceError::InvalidAlphabet { symbol: 'X', position: 2 })
        ));

        assert!(matches!(
            read_sequences(dir.path().join("missing.fasta")),
            Err(SequenceError::Engine(_))
        ));
        Ok(())
    }

    #[test]
    fn test_read_fasta_string() {
        let records = read_fasta_string(">a b c\nAC\nGT\n").unwrap();
        assert_eq!(records, vec![SequenceRecord::new("a b c", b"ACGT".to_vec())]);
    }
}
