//! Laplacian edge filter.

use ps_common::{clamp_u8_i32, EdgeConfig, EffectCategory, Layer, Outcome, ParamDef, ParamValue};
use tracing::debug;

use super::{convolve_interior, interior, intensity_plane, LAPLACIAN};
use crate::error::EffectError;
use crate::traits::Effect;

/// Replace interior pixels with the clamped, amplified Laplacian response.
///
/// `gain` multiplies the raw response before clamping to [0, 255]; negative
/// responses become black. Alpha and the border are untouched.
pub fn laplacian(layer: &mut Layer, gain: i32) {
    let width = layer.width() as usize;
    let height = layer.height() as usize;
    if width < 3 || height < 3 {
        return;
    }

    debug!(width, height, gain, "Applying laplacian");

    let plane = intensity_plane(layer);
    let response = convolve_interior(&plane, width, height, &LAPLACIAN);

    let pixels = layer.pixels_mut();
    for i in interior(width, height) {
        let value = clamp_u8_i32(response[i].saturating_mul(gain));
        pixels[i] = pixels[i].with_gray(value);
    }
}

/// Laplacian edge detection (3x3, 8-neighbour).
pub struct LaplacianEffect {
    gain: i32,
}

impl LaplacianEffect {
    pub fn new(cfg: &EdgeConfig) -> Self {
        Self {
            gain: cfg.laplacian_gain,
        }
    }
}

impl Default for LaplacianEffect {
    fn default() -> Self {
        Self::new(&EdgeConfig::default())
    }
}

impl Effect for LaplacianEffect {
    fn name(&self) -> &str {
        "edge_laplacian"
    }

    fn display_name(&self) -> &str {
        "Laplacian Edges"
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
        laplacian(layer, self.gain);
        Ok(Outcome::Applied)
    }
}
