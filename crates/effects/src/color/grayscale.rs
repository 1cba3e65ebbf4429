//! Grayscale reducers (per-pixel, alpha-preserving).
//!
//! | method     | formula                               |
//! |------------|---------------------------------------|
//! | Average    | `(r + g + b) / 3`                     |
//! | Luminosity | `0.299 r + 0.587 g + 0.114 b`         |
//! | Lightness  | `(max(r, g, b) + min(r, g, b)) / 2`   |
//! | Itu        | `0.2126 r + 0.7152 g + 0.0722 b` (BT.709) |
//!
//! All results are truncated to 8 bits. The weighted formulas are evaluated
//! in fixed point with the exact decimal weights, so white stays 255.

use ps_common::{EffectCategory, Layer, Outcome, ParamDef, ParamValue, Pixel};
use serde::{Deserialize, Serialize};

use crate::error::EffectError;
use crate::traits::Effect;

/// Grayscale reduction formula.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrayscaleMethod {
    Average,
    Luminosity,
    Lightness,
    Itu,
}

impl GrayscaleMethod {
    /// All methods in display order.
    pub fn all() -> &'static [GrayscaleMethod] {
        &[Self::Average, Self::Luminosity, Self::Lightness, Self::Itu]
    }

    /// Operation name used by hosts.
    pub fn effect_name(self) -> &'static str {
        match self {
            Self::Average => "monochrome_average",
            Self::Luminosity => "monochrome_luminosity",
            Self::Lightness => "monochrome_lightness",
            Self::Itu => "monochrome_itu",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Average => "Grayscale (Average)",
            Self::Luminosity => "Grayscale (Luminosity)",
            Self::Lightness => "Grayscale (Lightness)",
            Self::Itu => "Grayscale (ITU-R BT.709)",
        }
    }

    /// Gray value of one pixel.
    #[inline]
    pub fn reduce(self, p: Pixel) -> u8 {
        let (r, g, b) = (p.r as u32, p.g as u32, p.b as u32);
        let gray = match self {
            Self::Average => (r + g + b) / 3,
            Self::Luminosity => (299 * r + 587 * g + 114 * b) / 1000,
            Self::Lightness => (r.max(g).max(b) + r.min(g).min(b)) / 2,
            Self::Itu => (2126 * r + 7152 * g + 722 * b) / 10_000,
        };
        gray as u8
    }
}

/// Replace r, g and b of every pixel with its gray value; alpha is untouched.
pub fn grayscale(layer: &mut Layer, method: GrayscaleMethod) {
    layer.map_pixels(|p| p.with_gray(method.reduce(p)));
}

/// One grayscale reducer exposed as an effect.
pub struct GrayscaleEffect {
    method: GrayscaleMethod,
}

impl GrayscaleEffect {
    pub fn new(method: GrayscaleMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> GrayscaleMethod {
        self.method
    }
}

impl Effect for GrayscaleEffect {
    fn name(&self) -> &str {
        self.method.effect_name()
    }

    fn display_name(&self) -> &str {
        self.method.display_name()
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Color
    }

    fn param_defs(&self) -> &[ParamDef] {
        &[]
    }

    fn apply(
        &self,
        layer: &mut Layer,
        _params: &[(String, ParamValue)],
    ) -> Result<Outcome, EffectError> {
        grayscale(layer, self.method);
        Ok(Outcome::Applied)
    }
}
