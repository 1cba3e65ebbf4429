//! Quad-tree compression.
//!
//! The layer is recursively split into quadrants; a node whose pixels all
//! sit within a fixed per-channel distance of its mean color (or that is a
//! single row/column, or that reached the depth ceiling) is flattened to that
//! mean. The block-averaged grid is then downsampled to the target size with
//! nearest-neighbour sampling and replaces the layer's grid under the same id.

use ps_common::{
    CompressionConfig, EffectCategory, Layer, Outcome, ParamDef, ParamType, ParamValue, Pixel,
};
use tracing::debug;

use crate::error::EffectError;
use crate::params::{def, get_int};
use crate::traits::Effect;

/// Axis-aligned block of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Rect {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

impl Rect {
    /// Top-left, top-right, bottom-left, bottom-right. Odd sizes give the
    /// extra row/column to the bottom/right quadrants.
    fn quadrants(self) -> [Rect; 4] {
        let hw = self.w / 2;
        let hh = self.h / 2;
        [
            Rect { x: self.x, y: self.y, w: hw, h: hh },
            Rect { x: self.x + hw, y: self.y, w: self.w - hw, h: hh },
            Rect { x: self.x, y: self.y + hh, w: hw, h: self.h - hh },
            Rect { x: self.x + hw, y: self.y + hh, w: self.w - hw, h: self.h - hh },
        ]
    }

    fn rows(self, stride: usize) -> impl Iterator<Item = std::ops::Range<usize>> {
        (self.y..self.y + self.h).map(move |row| {
            let start = row * stride + self.x;
            start..start + self.w
        })
    }
}

/// Integer mean of each channel over `rect`.
fn mean_color(pixels: &[Pixel], stride: usize, rect: Rect) -> Pixel {
    let mut sum = [0u64; 4];
    for range in rect.rows(stride) {
        for p in &pixels[range] {
            sum[0] += p.r as u64;
            sum[1] += p.g as u64;
            sum[2] += p.b as u64;
            sum[3] += p.a as u64;
        }
    }
    let n = (rect.w * rect.h) as u64;
    Pixel::new(
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
        (sum[3] / n) as u8,
    )
}

fn is_uniform(pixels: &[Pixel], stride: usize, rect: Rect, mean: Pixel, threshold: u8) -> bool {
    let close = |a: u8, b: u8| a.abs_diff(b) <= threshold;
    rect.rows(stride).all(|range| {
        pixels[range].iter().all(|p| {
            close(p.r, mean.r) && close(p.g, mean.g) && close(p.b, mean.b) && close(p.a, mean.a)
        })
    })
}

fn compress_node(
    pixels: &mut [Pixel],
    stride: usize,
    rect: Rect,
    depth: u32,
    cfg: &CompressionConfig,
    leaves: &mut usize,
) {
    let mean = mean_color(pixels, stride, rect);
    let stop = rect.w <= 1
        || rect.h <= 1
        || depth >= cfg.max_depth
        || is_uniform(pixels, stride, rect, mean, cfg.uniformity_threshold);

    if stop {
        for range in rect.rows(stride) {
            pixels[range].fill(mean);
        }
        *leaves += 1;
        return;
    }

    for quadrant in rect.quadrants() {
        compress_node(pixels, stride, quadrant, depth + 1, cfg, leaves);
    }
}

/// Flatten near-uniform quad-tree blocks of `layer` to their mean color, in
/// place. Returns the number of leaf blocks.
pub fn block_average(layer: &mut Layer, cfg: &CompressionConfig) -> usize {
    if layer.is_empty() {
        return 0;
    }
    let root = Rect {
        x: 0,
        y: 0,
        w: layer.width() as usize,
        h: layer.height() as usize,
    };
    let stride = root.w;
    let mut leaves = 0;
    compress_node(layer.pixels_mut(), stride, root, 0, cfg, &mut leaves);
    leaves
}

/// Nearest-neighbour resample: destination `(x, y)` reads source
/// `(x * src_w / dst_w, y * src_h / dst_h)`.
pub fn resample_nearest(
    src: &[Pixel],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
) -> Vec<Pixel> {
    let mut out = Vec::with_capacity(dst_w * dst_h);
    for y in 0..dst_h {
        let sy = y * src_h / dst_h;
        for x in 0..dst_w {
            let sx = x * src_w / dst_w;
            out.push(src[sy * src_w + sx]);
        }
    }
    out
}

/// Compress `layer` to `target_width x target_height`.
///
/// Targets must be positive and no larger than the layer; otherwise the
/// layer is left as it was and [`Outcome::OutOfBounds`] is returned.
pub fn quad_compress(
    layer: &mut Layer,
    target_width: i64,
    target_height: i64,
    cfg: &CompressionConfig,
) -> Outcome {
    let (src_w, src_h) = (layer.width() as i64, layer.height() as i64);
    if target_width <= 0 || target_height <= 0 || target_width > src_w || target_height > src_h {
        debug!(
            target_width,
            target_height,
            src_w,
            src_h,
            "Compression target outside layer bounds"
        );
        return Outcome::OutOfBounds;
    }

    let leaves = block_average(layer, cfg);
    let (tw, th) = (target_width as usize, target_height as usize);
    let resampled = resample_nearest(layer.pixels(), src_w as usize, src_h as usize, tw, th);
    layer.replace_grid(tw as u32, th as u32, resampled);

    debug!(src_w, src_h, target_width, target_height, leaves, "Quad compression complete");
    Outcome::Applied
}

fn param_defs() -> Vec<ParamDef> {
    vec![
        def(
            "new_width",
            "Width",
            ParamType::Int {
                min: 1,
                max: i32::MAX,
            },
            ParamValue::Int(1),
        ),
        def(
            "new_height",
            "Height",
            ParamType::Int {
                min: 1,
                max: i32::MAX,
            },
            ParamValue::Int(1),
        ),
    ]
}

/// Quad-tree compression and resize.
pub struct QuadCompressEffect {
    params: Vec<ParamDef>,
    cfg: CompressionConfig,
}

impl QuadCompressEffect {
    pub fn new(cfg: &CompressionConfig) -> Self {
        Self {
            params: param_defs(),
            cfg: cfg.clone(),
        }
    }
}

impl Default for QuadCompressEffect {
    fn default() -> Self {
        Self::new(&CompressionConfig::default())
    }
}

impl Effect for QuadCompressEffect {
    fn name(&self) -> &str {
        "quad_compression"
    }

    fn display_name(&self) -> &str {
        "Quad-Tree Compression"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Compress
    }

    fn param_defs(&self) -> &[ParamDef] {
        &self.params
    }

    fn apply(
        &self,
        layer: &mut Layer,
        params: &[(String, ParamValue)],
    ) -> Result<Outcome, EffectError> {
        let w = get_int("new_width", params, &self.params);
        let h = get_int("new_height", params, &self.params);
        Ok(quad_compress(layer, w as i64, h as i64, &self.cfg))
    }
}
