//! Buffer layout errors (thiserror-based).

use thiserror::Error;

/// A pixel buffer handed across the kernel boundary does not match its
/// declared dimensions.
///
/// These indicate a layout mismatch between host and kernel, not a normal
/// edge case, so entry points report them instead of ignoring them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Buffer size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}

/// Byte length of a tightly packed RGBA8 buffer, or an error for
/// non-positive dimensions.
pub fn rgba_len(width: i64, height: i64) -> Result<usize, BufferError> {
    if width <= 0 || height <= 0 {
        return Err(BufferError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(BufferError::InvalidDimensions { width, height })
}

/// Check that `got` bytes hold exactly `width * height` RGBA8 pixels.
pub fn check_rgba_len(width: i64, height: i64, got: usize) -> Result<usize, BufferError> {
    let expected = rgba_len(width, height)?;
    if expected != got {
        return Err(BufferError::SizeMismatch { expected, got });
    }
    Ok(expected)
}
