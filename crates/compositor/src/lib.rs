//! `ps-compositor`: CPU layer compositing for the PixelStack kernel.
//!
//! This crate merges an explicit, caller-supplied stack of layers into one
//! flat RGBA8 output buffer with the source-over rule.
//!
//! The output starts fully transparent. Layers are visited from the top of
//! the stack down, each one blended *under* what has accumulated so far.
//! Layers smaller than the canvas only touch the sub-rectangle they cover.
//! The output length is checked by [`Compositor::composite`] before any
//! pixel is written.

mod blend;
pub mod compositor;

mod error;

// Re-export primary API
pub use compositor::Compositor;
pub use error::CompositorError;
