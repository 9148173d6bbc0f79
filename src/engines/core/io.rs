//! Buffered file I/O
//!
//! Line-oriented reading and buffered writing for sequence files and
//! reports. Lines are handed out as raw bytes; decoding is left to the
//! format layer.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

// Default buffer sizes
const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;
const DEFAULT_WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Buffered file reader
pub struct FastReader {
    reader: BufReader<File>,
    path: String,
}

impl FastReader {
    /// Create a new reader for the given file path
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let buf_size = buffer_size.unwrap_or(DEFAULT_READ_BUFFER_SIZE);
        let reader = BufReader::with_capacity(buf_size, file);

        Ok(Self {
            reader,
            path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    /// Read the entire file into a vector
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Read the file line by line, without line terminators
    pub fn read_lines(&mut self) -> Lines<'_, BufReader<File>> {
        Lines::new(&mut self.reader)
    }

    /// Get the path of the file being read
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Iterator over the byte lines of any buffered reader
///
/// Strips `\n` and a preceding `\r`, so CRLF input reads the same as LF.
/// No UTF-8 check is made.
pub struct Lines<'a, R: BufRead> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: BufRead> Lines<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<'a, R: BufRead> Iterator for Lines<'a, R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.ends_with(b"\n") {
                    self.buffer.pop();
                }
                if self.buffer.ends_with(b"\r") {
                    self.buffer.pop();
                }
                Some(Ok(self.buffer.clone()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Buffered file writer; truncates on open
pub struct FastWriter {
    writer: BufWriter<File>,
    path: String,
}

impl FastWriter {
    /// Create a new writer for the given file path
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;

        let buf_size = buffer_size.unwrap_or(DEFAULT_WRITE_BUFFER_SIZE);
        let writer = BufWriter::with_capacity(buf_size, file);

        Ok(Self {
            writer,
            path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    /// Get the path of the file being written
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Write for FastWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
