//! Laplacian of Gaussian: BT.709 grayscale, Gaussian blur, then Laplacian.
//!
//! Each stage mutates the same layer; no intermediate layer is kept.

use ps_common::{
    BlurConfig, EdgeConfig, EffectCategory, Layer, Outcome, ParamDef, ParamType, ParamValue,
};

use super::laplacian::laplacian;
use crate::blur::gaussian_blur;
use crate::color::{grayscale, GrayscaleMethod};
use crate::error::EffectError;
use crate::params::{def, get_float, get_int};
use crate::traits::Effect;

/// Run the three LoG stages on `layer` in place.
pub fn laplacian_of_gaussian(layer: &mut Layer, sigma: f32, kernel_size: usize, gain: i32) {
    grayscale(layer, GrayscaleMethod::Itu);
    gaussian_blur(layer, sigma, kernel_size);
    laplacian(layer, gain);
}

/// Laplacian-of-Gaussian edge detection.
pub struct LaplacianOfGaussianEffect {
    params: Vec<ParamDef>,
    gain: i32,
}

impl LaplacianOfGaussianEffect {
    pub fn new(blur: &BlurConfig, edge: &EdgeConfig) -> Self {
        Self {
            params: vec![
                def(
                    "sigma",
                    "Sigma",
                    ParamType::Float {
                        min: 0.0,
                        max: blur.max_sigma,
                    },
                    ParamValue::Float(1.4),
                ),
                def(
                    "kernel_size",
                    "Kernel Size",
                    ParamType::Int {
                        min: 1,
                        max: blur.max_kernel_size,
                    },
                    ParamValue::Int(5),
                ),
            ],
            gain: edge.laplacian_gain,
        }
    }
}

impl Default for LaplacianOfGaussianEffect {
    fn default() -> Self {
        Self::new(&BlurConfig::default(), &EdgeConfig::default())
    }
}

impl Effect for LaplacianOfGaussianEffect {
    fn name(&self) -> &str {
        "edge_laplacian_of_gaussian"
    }

    fn display_name(&self) -> &str {
        "Laplacian of Gaussian"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Edge
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
        laplacian_of_gaussian(layer, sigma, kernel_size, self.gain);
        Ok(Outcome::Applied)
    }
}
