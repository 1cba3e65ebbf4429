//! Color reduction effects.
//!
//! - [`GrayscaleEffect`]: Average, luminosity, lightness and BT.709 reducers

pub mod grayscale;

pub use grayscale::{grayscale, GrayscaleEffect, GrayscaleMethod};
