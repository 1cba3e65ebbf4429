//! Session error types.

use ps_common::BufferError;
use ps_compositor::CompositorError;
use ps_effects::EffectError;
use thiserror::Error;

/// Errors reported by [`Session`](crate::Session) entry points.
///
/// Unknown layer ids and out-of-bounds coordinates are not errors; see
/// [`ps_common::Outcome`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// An ingest buffer did not match its declared dimensions.
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// An operation named an unknown effect or carried invalid parameters.
    #[error("Effect error: {0}")]
    Effect(#[from] EffectError),

    /// The output buffer did not match the canvas size.
    #[error("Compositor error: {0}")]
    Compositor(#[from] CompositorError),
}
