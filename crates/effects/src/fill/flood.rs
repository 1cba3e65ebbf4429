//! Flood fill (bucket fill) with a color-distance threshold.
//!
//! Breadth-first over 4-connected neighbours, starting at the seed. Every
//! candidate is compared against the seed's color as it was before any
//! write, so a fill cannot creep along a gradient one step at a time.

use std::collections::VecDeque;

use ps_common::{
    source_over, EffectCategory, Layer, Outcome, ParamDef, ParamType, ParamValue, Pixel,
};
use tracing::debug;

use crate::error::EffectError;
use crate::params::{def, get_color, get_float, get_int};
use crate::traits::Effect;

/// Normalized squared Euclidean distance over r, g, b and a.
///
/// Channels are scaled to [0, 1] and the sum is divided by 4, so the result
/// lies in [0, 1]: 0 for identical pixels, 1 for opposite corners of the
/// RGBA cube.
pub fn color_distance(a: Pixel, b: Pixel) -> f32 {
    let d = |x: u8, y: u8| {
        let v = (x as f32 - y as f32) / 255.0;
        v * v
    };
    (d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b) + d(a.a, b.a)) / 4.0
}

/// Whether `candidate` is within `threshold_percent` of `reference`.
///
/// The percentage is compared on the Euclidean scale (`distance ≤ (t/100)²`):
/// 0 only matches identical pixels and 100 matches everything.
pub fn within_threshold(reference: Pixel, candidate: Pixel, threshold_percent: f32) -> bool {
    let t = if threshold_percent.is_nan() {
        0.0
    } else {
        threshold_percent.clamp(0.0, 100.0) / 100.0
    };
    color_distance(reference, candidate) <= t * t
}

/// Fill the region connected to `(x, y)` whose pixels lie within
/// `threshold_percent` of the seed color.
///
/// An opaque `color` replaces matched pixels; a translucent one is blended
/// over them with source-over. Returns [`Outcome::OutOfBounds`] without
/// touching the layer if the seed is outside the grid.
pub fn flood_fill(layer: &mut Layer, x: i64, y: i64, color: Pixel, threshold_percent: f32) -> Outcome {
    if !layer.contains(x, y) {
        debug!(x, y, width = layer.width(), height = layer.height(), "Flood fill seed out of bounds");
        return Outcome::OutOfBounds;
    }

    let width = layer.width() as usize;
    let height = layer.height() as usize;
    let seed = y as usize * width + x as usize;
    let reference = layer.pixels()[seed];

    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::new();
    visited[seed] = true;
    queue.push_back(seed);

    let pixels = layer.pixels_mut();
    let mut filled = 0usize;

    while let Some(idx) = queue.pop_front() {
        let current = pixels[idx];
        if !within_threshold(reference, current, threshold_percent) {
            continue;
        }
        pixels[idx] = if color.a == 255 {
            color
        } else {
            source_over(color, current)
        };
        filled += 1;

        let (cx, cy) = (idx % width, idx / width);
        let neighbours = [
            (cx > 0).then(|| idx - 1),
            (cx + 1 < width).then(|| idx + 1),
            (cy > 0).then(|| idx - width),
            (cy + 1 < height).then(|| idx + width),
        ];
        for n in neighbours.into_iter().flatten() {
            if !visited[n] {
                visited[n] = true;
                queue.push_back(n);
            }
        }
    }

    debug!(x, y, threshold_percent, filled, "Flood fill complete");
    Outcome::Applied
}

fn param_defs() -> Vec<ParamDef> {
    vec![
        def(
            "x",
            "X",
            ParamType::Int {
                min: i32::MIN,
                max: i32::MAX,
            },
            ParamValue::Int(0),
        ),
        def(
            "y",
            "Y",
            ParamType::Int {
                min: i32::MIN,
                max: i32::MAX,
            },
            ParamValue::Int(0),
        ),
        def(
            "color",
            "Fill Color",
            ParamType::Color,
            ParamValue::Color([0, 0, 0, 255]),
        ),
        def(
            "threshold",
            "Error Threshold (%)",
            ParamType::Float {
                min: 0.0,
                max: 100.0,
            },
            ParamValue::Float(0.0),
        ),
    ]
}

/// Bucket fill.
pub struct FloodFillEffect {
    params: Vec<ParamDef>,
}

impl FloodFillEffect {
    pub fn new() -> Self {
        Self {
            params: param_defs(),
        }
    }
}

impl Default for FloodFillEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for FloodFillEffect {
    fn name(&self) -> &str {
        "bucket_fill"
    }

    fn display_name(&self) -> &str {
        "Bucket Fill"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Fill
    }

    fn param_defs(&self) -> &[ParamDef] {
        &self.params
    }

    fn apply(
        &self,
        layer: &mut Layer,
        params: &[(String, ParamValue)],
    ) -> Result<Outcome, EffectError> {
        let x = get_int("x", params, &self.params);
        let y = get_int("y", params, &self.params);
        let color = Pixel::from(get_color("color", params, &self.params));
        let threshold = get_float("threshold", params, &self.params);
        Ok(flood_fill(layer, x as i64, y as i64, color, threshold))
    }
}
