//! Low-level engines
//!
//! Buffered file I/O, format parsers and the string kernels that the
//! sequence modules are built on.

pub mod core;
pub mod compute;
pub mod storage;

use thiserror::Error;

/// Error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence data: {0}")]
    InvalidSequenceData(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
