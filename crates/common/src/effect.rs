//! Effect categories, parameter definitions, and parameter values.

use serde::{Deserialize, Serialize};

/// Effect category for grouping in the host UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    Color,
    Blur,
    Edge,
    Fill,
    Compress,
}

impl EffectCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Blur => "Blur",
            Self::Edge => "Edge Detection",
            Self::Fill => "Fill",
            Self::Compress => "Compression",
        }
    }
}

/// Parameter definition for an effect.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub display_name: String,
    pub param_type: ParamType,
    pub default: ParamValue,
}

/// Parameter type with constraints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ParamType {
    Float { min: f32, max: f32 },
    Int { min: i32, max: i32 },
    Color,
}

/// Concrete parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f32),
    Int(i32),
    /// Straight RGBA8.
    Color([u8; 4]),
}

impl ParamValue {
    /// Float value; integers are widened.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[u8; 4]> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}
