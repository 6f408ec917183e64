use alloc::string::String;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced to the caller of an offending API.
///
/// Non-finite scroll offsets, dimensions and measurements are *not* errors: they are dropped
/// silently and the previous value is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("index {index} is out of range for a list of {count} items")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("estimated item size must be finite and positive, got {0}")]
    InvalidEstimatedSize(f64),

    #[error("viewport dimensions must be finite and non-negative, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("initial scroll offset must be finite and non-negative, got {0}")]
    InvalidScrollOffset(f64),

    #[error("invalid dimension: {0:?}")]
    InvalidDimension(String),
}

impl Error {
    pub(crate) fn out_of_range(index: usize, count: usize) -> Self {
        vwarn!(index, count, "index out of range");
        Self::IndexOutOfRange { index, count }
    }
}
