//! Gaussian Blur effect (separable, two-pass).
//!
//! The 1-D kernel is applied horizontally into a fully materialized `f32`
//! buffer, then vertically from that buffer back into the layer. Both passes
//! clamp sample coordinates to the nearest edge pixel. All four channels are
//! blurred independently, alpha included.

use ps_common::{
    BlurConfig, EffectCategory, Layer, Outcome, ParamDef, ParamType, ParamValue, Pixel,
};
use tracing::debug;

use crate::error::EffectError;
use crate::params::{def, get_float, get_int};
use crate::traits::Effect;

/// One pixel with channels widened to `f32` (still on the 0..=255 scale).
pub type Rgba32 = [f32; 4];

/// Kernel length actually used for a requested size: at least 1, always odd.
pub fn effective_kernel_size(requested: usize) -> usize {
    let size = requested.max(1);
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Normalized 1-D Gaussian kernel.
///
/// Weight `i` is `exp(-(i - center)² / (2σ²))`, scaled so the weights sum
/// to 1. A non-positive or non-finite sigma gives the identity kernel (all
/// weight on the center tap).
pub fn gaussian_kernel(sigma: f32, size: usize) -> Vec<f32> {
    let size = effective_kernel_size(size);
    let center = (size / 2) as f32;

    if !(sigma.is_finite() && sigma > 0.0) {
        let mut delta = vec![0.0; size];
        delta[size / 2] = 1.0;
        return delta;
    }

    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Widen a layer's pixels for convolution.
pub fn to_rgba32(layer: &Layer) -> Vec<Rgba32> {
    layer
        .pixels()
        .iter()
        .map(|p| [p.r as f32, p.g as f32, p.b as f32, p.a as f32])
        .collect()
}

#[inline]
fn round_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Round and clamp widened pixels back to RGBA8.
pub fn to_pixel(v: Rgba32) -> Pixel {
    Pixel::new(
        round_channel(v[0]),
        round_channel(v[1]),
        round_channel(v[2]),
        round_channel(v[3]),
    )
}

/// Convolve each row with `kernel`, clamping x to `[0, width - 1]`.
pub fn horizontal_pass(src: &[Rgba32], width: usize, height: usize, kernel: &[f32]) -> Vec<Rgba32> {
    let half = (kernel.len() / 2) as isize;
    let max_x = width as isize - 1;
    let mut out = vec![[0.0; 4]; src.len()];

    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, w) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, max_x) as usize;
                let s = row[sx];
                for c in 0..4 {
                    acc[c] += s[c] * w;
                }
            }
            out[y * width + x] = acc;
        }
    }
    out
}

/// Convolve each column with `kernel`, clamping y to `[0, height - 1]`.
pub fn vertical_pass(src: &[Rgba32], width: usize, height: usize, kernel: &[f32]) -> Vec<Rgba32> {
    let half = (kernel.len() / 2) as isize;
    let max_y = height as isize - 1;
    let mut out = vec![[0.0; 4]; src.len()];

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, w) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, max_y) as usize;
                let s = src[sy * width + x];
                for c in 0..4 {
                    acc[c] += s[c] * w;
                }
            }
            out[y * width + x] = acc;
        }
    }
    out
}

/// Blur `layer` in place with a separable Gaussian.
pub fn gaussian_blur(layer: &mut Layer, sigma: f32, kernel_size: usize) {
    if layer.is_empty() {
        return;
    }
    let width = layer.width() as usize;
    let height = layer.height() as usize;
    let kernel = gaussian_kernel(sigma, kernel_size);

    debug!(
        sigma,
        kernel_size = kernel.len(),
        width,
        height,
        "Applying gaussian blur"
    );

    let src = to_rgba32(layer);
    let horizontal = horizontal_pass(&src, width, height, &kernel);
    let blurred = vertical_pass(&horizontal, width, height, &kernel);

    for (dst, v) in layer.pixels_mut().iter_mut().zip(blurred) {
        *dst = to_pixel(v);
    }
}

fn param_defs(cfg: &BlurConfig) -> Vec<ParamDef> {
    vec![
        def(
            "sigma",
            "Sigma",
            ParamType::Float {
                min: 0.0,
                max: cfg.max_sigma,
            },
            ParamValue::Float(1.0),
        ),
        def(
            "kernel_size",
            "Kernel Size",
            ParamType::Int {
                min: 1,
                max: cfg.max_kernel_size,
            },
            ParamValue::Int(5),
        ),
    ]
}

/// Gaussian Blur (separable two-pass).
pub struct GaussianBlurEffect {
    params: Vec<ParamDef>,
}

impl GaussianBlurEffect {
    pub fn new(cfg: &BlurConfig) -> Self {
        Self {
            params: param_defs(cfg),
        }
    }
}

impl Default for GaussianBlurEffect {
    fn default() -> Self {
        Self::new(&BlurConfig::default())
    }
}

impl Effect for GaussianBlurEffect {
    fn name(&self) -> &str {
        "gaussian_blur"
    }

    fn display_name(&self) -> &str {
        "Gaussian Blur"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Blur
    }

    fn param_defs(&self) -> &[ParamDef] {
        &self.params
    }

    fn apply(
        &self,
        layer: &mut Layer,
        params: &[(String, ParamValue)],
    ) -> Result<Outcome, EffectError> {
        let sigma = get_float("sigma", params, &self.params);
        let kernel_size = get_int("kernel_size", params, &self.params).max(1) as usize;
        gaussian_blur(layer, sigma, kernel_size);
        Ok(Outcome::Applied)
    }
}
