//! Error types for pixops-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixops_core::Error),

    /// Neighbourhood dimensions must be odd and at least 1
    #[error("invalid neighbourhood dimensions: {width}x{height}")]
    InvalidNeighbourhood {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        /// Expected depth description
        expected: &'static str,
        /// Actual depth in bits
        actual: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
