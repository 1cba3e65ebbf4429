//! `ps-effects`: Layer effect registry, parameter definitions, and the CPU filters.
//!
//! This crate provides:
//! - The [`Effect`] trait that all layer effects implement
//! - An [`EffectRegistry`] for by-name and by-category lookup
//! - Parameter validation and conversion helpers
//! - 10 built-in effects across 5 categories:
//!
//! ## Color (4 effects)
//! - Grayscale: average, luminosity, lightness, ITU-R BT.709
//!
//! ## Blur (1 effect)
//! - Gaussian Blur (separable, 2-pass)
//!
//! ## Edge (3 effects)
//! - Sobel
//! - Laplacian
//! - Laplacian of Gaussian
//!
//! ## Fill (1 effect)
//! - Bucket fill with an error threshold
//!
//! ## Compress (1 effect)
//! - Quad-tree compression with nearest-neighbour resize
//!
//! Every filter is a plain function over a [`ps_common::Layer`] as well, so
//! callers that already know which filter they want can skip the registry.

pub mod blur;
pub mod color;
pub mod compress;
pub mod edge;
pub mod error;
pub mod fill;
pub mod params;
pub mod registry;
pub mod traits;

// Re-export primary types at crate root.
pub use error::EffectError;
pub use params::{get_param_or_default, validate_params};
pub use registry::EffectRegistry;
pub use traits::Effect;

// Re-export all effect structs and filter functions for convenience.
pub use blur::{gaussian_blur, GaussianBlurEffect};
pub use color::{grayscale, GrayscaleEffect, GrayscaleMethod};
pub use compress::{quad_compress, QuadCompressEffect};
pub use edge::{
    laplacian, laplacian_of_gaussian, sobel, LaplacianEffect, LaplacianOfGaussianEffect,
    SobelEffect,
};
pub use fill::{flood_fill, FloodFillEffect};
