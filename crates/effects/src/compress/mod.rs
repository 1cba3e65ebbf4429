//! Lossy compression effects.
//!
//! - [`QuadCompressEffect`]: Quad-tree block averaging followed by nearest-neighbour downsampling

pub mod quad;

pub use quad::{quad_compress, resample_nearest, QuadCompressEffect};
