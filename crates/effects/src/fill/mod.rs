//! Region fill effects.
//!
//! - [`FloodFillEffect`]: Breadth-first bucket fill with a color-distance threshold

pub mod flood;

pub use flood::{color_distance, flood_fill, FloodFillEffect};
