//! FASTA parsing and writing
//!
//! A record is a `>` header line followed by zero or more data lines.
//! Data lines are concatenated with all whitespace removed; blank lines
//! are ignored anywhere in the file.

use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info};

use crate::engines::core::io::{FastReader, FastWriter, Lines};
use crate::engines::{EngineError, EngineResult};

/// A labeled record exactly as read from disk, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Header text after `>`, trimmed
    pub id: String,
    /// Concatenated data lines, whitespace removed, case untouched
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    /// Create a new record
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Get the length of the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// FASTA format parser
///
/// Works on raw bytes: only the header is decoded, lossily. Sequence bytes
/// are passed through untouched so that validation sees them as they are.
#[derive(Debug, Clone, Default)]
pub struct FastaParser;

impl FastaParser {
    /// Create a new FASTA parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a FASTA file into raw records, preserving file order
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> EngineResult<Vec<SequenceRecord>> {
        let mut reader = FastReader::new(path.as_ref(), None)?;
        let records = self.parse_lines(reader.read_lines())?;
        info!("Read {} records from {}", records.len(), reader.path());
        Ok(records)
    }

    /// Parse FASTA from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: &mut R) -> EngineResult<Vec<SequenceRecord>> {
        self.parse_lines(Lines::new(reader))
    }

    /// Parse FASTA held in a string
    pub fn parse_string(&self, content: &str) -> EngineResult<Vec<SequenceRecord>> {
        self.parse_reader(&mut content.as_bytes())
    }

    fn parse_lines<I>(&self, lines: I) -> EngineResult<Vec<SequenceRecord>>
    where
        I: Iterator<Item = std::io::Result<Vec<u8>>>,
    {
        let mut records = Vec::new();
        let mut current: Option<SequenceRecord> = None;

        for (line_no, line_result) in lines.enumerate() {
            let line = line_result?;
            let trimmed = trim_ascii(&line);

            if trimmed.is_empty() {
                continue;
            }

            if let Some(header) = trimmed.strip_prefix(b">") {
                if let Some(record) = current.take() {
                    debug!("Parsed record '{}' ({} bp)", record.id, record.len());
                    records.push(record);
                }
                let id = String::from_utf8_lossy(trim_ascii(header)).into_owned();
                current = Some(SequenceRecord::new(id, Vec::new()));
            } else {
                let record = current.as_mut().ok_or_else(|| {
                    EngineError::InvalidSequenceData(format!(
                        "Sequence data before first header at line {}",
                        line_no + 1
                    ))
                })?;
                record
                    .sequence
                    .extend(trimmed.iter().filter(|b| !b.is_ascii_whitespace()));
            }
        }

        if let Some(record) = current {
            debug!("Parsed record '{}' ({} bp)", record.id, record.len());
            records.push(record);
        }

        Ok(records)
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// FASTA format writer
#[derive(Debug, Clone)]
pub struct FastaWriter {
    /// Bases per data line; 0 writes each sequence on a single line
    line_width: usize,
}

impl FastaWriter {
    /// Create a new FASTA writer with the default line width of 60
    pub fn new() -> Self {
        Self { line_width: 60 }
    }

    /// Create a new FASTA writer with the specified line width
    pub fn with_line_width(line_width: usize) -> Self {
        Self { line_width }
    }

    /// Write records to a file, replacing any previous content
    pub fn write_file<P: AsRef<Path>>(&self, records: &[SequenceRecord], path: P) -> EngineResult<()> {
        let mut writer = FastWriter::new(path, None)?;
        self.write_to(records, &mut writer)?;
        writer.flush()?;
        info!("Wrote {} records to {}", records.len(), writer.path());
        Ok(())
    }

    /// Write records to a string
    pub fn write_string(&self, records: &[SequenceRecord]) -> EngineResult<String> {
        let mut buffer = Vec::new();
        self.write_to(records, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| EngineError::InvalidSequenceData(format!("Non UTF-8 sequence data: {}", e)))
    }

    /// Write records to any writer
    pub fn write_to<W: Write>(&self, records: &[SequenceRecord], writer: &mut W) -> EngineResult<()> {
        for record in records {
            writeln!(writer, ">{}", record.id)?;

            if record.sequence.is_empty() {
                continue;
            }

            if self.line_width == 0 {
                writer.write_all(&record.sequence)?;
                writer.write_all(b"\n")?;
            } else {
                for chunk in record.sequence.chunks(self.line_width) {
                    writer.write_all(chunk)?;
                    writer.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    }
}

impl Default for FastaWriter {
    fn default() -> Self {
        Self::new()
    }
}
