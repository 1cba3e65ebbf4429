//! Blur effects.
//!
//! - [`GaussianBlurEffect`]: Separable Gaussian blur with clamp-to-edge sampling

pub mod gaussian;

pub use gaussian::{gaussian_blur, gaussian_kernel, GaussianBlurEffect};
