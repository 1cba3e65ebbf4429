//! Sobel edge detector.

use ps_common::{EdgeConfig, EffectCategory, GradientNorm, Layer, Outcome, ParamDef, ParamValue};
use tracing::debug;

use super::{convolve_interior, interior, intensity_plane, SOBEL_X, SOBEL_Y};
use crate::error::EffectError;
use crate::traits::Effect;

/// Replace interior pixels with their normalized gradient magnitude.
///
/// The strongest gradient in the layer maps to 255. Alpha and the 1-pixel
/// border are left as they were. If the layer has no gradient at all the
/// interior becomes black.
pub fn sobel(layer: &mut Layer, norm: GradientNorm) {
    let width = layer.width() as usize;
    let height = layer.height() as usize;
    if width < 3 || height < 3 {
        return;
    }

    let plane = intensity_plane(layer);
    let gx = convolve_interior(&plane, width, height, &SOBEL_X);
    let gy = convolve_interior(&plane, width, height, &SOBEL_Y);

    let magnitude: Vec<f32> = gx
        .iter()
        .zip(&gy)
        .map(|(&x, &y)| {
            let (x, y) = (x as f32, y as f32);
            match norm {
                GradientNorm::Euclidean => (x * x + y * y).sqrt(),
                GradientNorm::Manhattan => x.abs() + y.abs(),
            }
        })
        .collect();

    let max = interior(width, height)
        .map(|i| magnitude[i])
        .fold(0.0f32, f32::max);

    debug!(width, height, ?norm, max_magnitude = max, "Applying sobel");

    let pixels = layer.pixels_mut();
    for i in interior(width, height) {
        let value = if max > 0.0 {
            (magnitude[i] / max * 255.0) as u8
        } else {
            0
        };
        pixels[i] = pixels[i].with_gray(value);
    }
}

/// Sobel edge detection.
pub struct SobelEffect {
    norm: GradientNorm,
}

impl SobelEffect {
    pub fn new(cfg: &EdgeConfig) -> Self {
        Self {
            norm: cfg.gradient_norm,
        }
    }
}

impl Default for SobelEffect {
    fn default() -> Self {
        Self::new(&EdgeConfig::default())
    }
}

impl Effect for SobelEffect {
    fn name(&self) -> &str {
        "edge_sobel"
    }

    fn display_name(&self) -> &str {
        "Sobel Edges"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Edge
    }

    fn param_defs(&self) -> &[ParamDef] {
        &[]
    }

    fn apply(
        &self,
        layer: &mut Layer,
        _params: &[(String, ParamValue)],
    ) -> Result<Outcome, EffectError> {
        sobel(layer, self.norm);
        Ok(Outcome::Applied)
    }
}
