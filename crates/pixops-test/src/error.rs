//! Error types for the test framework

use thiserror::Error;

/// Failures recorded during regression testing
#[derive(Debug, Clone, Error)]
pub enum TestError {
    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Pix geometry differs
    #[error("pix comparison failed at index {index}: {expected:?} vs {actual:?} (w, h, bpp, spp)")]
    PixGeometry {
        index: usize,
        expected: (u32, u32, u32, u32),
        actual: (u32, u32, u32, u32),
    },

    /// Pix samples differ
    #[error("pix comparison failed at index {index}: first mismatch at ({x}, {y})")]
    PixMismatch { index: usize, x: u32, y: u32 },

    /// Byte string comparison failed
    #[error("string comparison failed at index {index}: sizes {len1} vs {len2}")]
    StringMismatch {
        index: usize,
        len1: usize,
        len2: usize,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
