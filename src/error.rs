//! Error types for the Life engine
//!
//! Every fallible operation in the library returns [`LifeError`]. Startup
//! errors (bad image dimensions or pixel formats) are fatal for the binary,
//! while [`LifeError::DimensionMismatch`] raised by a step is reported and
//! skipped by the session.

use thiserror::Error;

/// Errors produced by the grid, binarizer and stepper
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Grid or image dimensions are invalid (zero-sized, or the pixel buffer
    /// is too small for the declared size and pitch)
    #[error("invalid dimensions {width}x{height}: {reason}")]
    Dimension {
        width: usize,
        height: usize,
        reason: &'static str,
    },

    /// The pixel format is not one the engine understands
    #[error("unsupported pixel format: {bits_per_pixel} bits per pixel instead of 32")]
    Format { bits_per_pixel: usize },

    /// A coordinate fell outside the grid
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// `step` was asked to work on buffers of different sizes
    #[error("grid dimensions do not match: front is {front:?}, back is {back:?}")]
    DimensionMismatch {
        front: (usize, usize),
        back: (usize, usize),
    },

    /// A rule bound lies outside 0..=8 or a range is inverted
    #[error("invalid rule range {min}..={max}: bounds must satisfy 0 <= min <= max <= 8")]
    InvalidRules { min: u8, max: u8 },
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LifeError>;
