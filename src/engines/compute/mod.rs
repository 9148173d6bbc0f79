//! Compute primitives for sequence operations
//!
//! Pattern search and per-base kernels over raw nucleotide bytes.

pub mod string_ops;

/// Compute operation result type
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Error types for compute operations
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error("Invalid input data: {0}")]
    InvalidInput(String),
}
