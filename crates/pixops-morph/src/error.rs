//! Error types for pixops-morph

use thiserror::Error;

/// Errors that can occur while building structuring elements or running
/// morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixops_core::Error),

    /// Invalid structuring element configuration
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Source image content is not acceptable for the operation
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Malformed structuring element text
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O error while reading or writing structuring element text
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
