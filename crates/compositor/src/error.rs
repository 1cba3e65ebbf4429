//! Compositor error types.

use ps_common::BufferError;
use thiserror::Error;

/// Errors that can occur during compositing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositorError {
    /// The caller's output buffer does not hold `width * height` RGBA8 pixels.
    #[error("Output buffer: {0}")]
    Output(#[from] BufferError),
}
