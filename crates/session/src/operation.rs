//! Serializable layer operations.
//!
//! An [`Operation`] names one effect, the layer it targets and its
//! parameters. The JSON form is internally tagged by effect name:
//!
//! ```json
//! {"type": "gaussian_blur", "layer_id": 2, "sigma": 1.5, "kernel_size": 5}
//! ```

use ps_common::{LayerId, ParamValue};
use ps_effects::GrayscaleMethod;
use serde::{Deserialize, Serialize};

/// One mutating operation on a single layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    MonochromeAverage {
        layer_id: LayerId,
    },
    MonochromeLuminosity {
        layer_id: LayerId,
    },
    MonochromeLightness {
        layer_id: LayerId,
    },
    MonochromeItu {
        layer_id: LayerId,
    },
    GaussianBlur {
        layer_id: LayerId,
        sigma: f32,
        kernel_size: i32,
    },
    EdgeSobel {
        layer_id: LayerId,
    },
    EdgeLaplacian {
        layer_id: LayerId,
    },
    EdgeLaplacianOfGaussian {
        layer_id: LayerId,
        sigma: f32,
        kernel_size: i32,
    },
    BucketFill {
        layer_id: LayerId,
        x: i32,
        y: i32,
        /// Straight RGBA8 fill color.
        color: [u8; 4],
        /// Error threshold in percent, 0 to 100.
        threshold: f32,
    },
    QuadCompression {
        layer_id: LayerId,
        new_width: i32,
        new_height: i32,
    },
}

impl Operation {
    /// Grayscale operation for `method`.
    pub fn grayscale(method: GrayscaleMethod, layer_id: LayerId) -> Self {
        match method {
            GrayscaleMethod::Average => Self::MonochromeAverage { layer_id },
            GrayscaleMethod::Luminosity => Self::MonochromeLuminosity { layer_id },
            GrayscaleMethod::Lightness => Self::MonochromeLightness { layer_id },
            GrayscaleMethod::Itu => Self::MonochromeItu { layer_id },
        }
    }

    /// Registry name of the effect this operation runs.
    pub fn effect_name(&self) -> &'static str {
        match self {
            Self::MonochromeAverage { .. } => GrayscaleMethod::Average.effect_name(),
            Self::MonochromeLuminosity { .. } => GrayscaleMethod::Luminosity.effect_name(),
            Self::MonochromeLightness { .. } => GrayscaleMethod::Lightness.effect_name(),
            Self::MonochromeItu { .. } => GrayscaleMethod::Itu.effect_name(),
            Self::GaussianBlur { .. } => "gaussian_blur",
            Self::EdgeSobel { .. } => "edge_sobel",
            Self::EdgeLaplacian { .. } => "edge_laplacian",
            Self::EdgeLaplacianOfGaussian { .. } => "edge_laplacian_of_gaussian",
            Self::BucketFill { .. } => "bucket_fill",
            Self::QuadCompression { .. } => "quad_compression",
        }
    }

    /// Target layer.
    pub fn layer_id(&self) -> LayerId {
        match self {
            Self::MonochromeAverage { layer_id }
            | Self::MonochromeLuminosity { layer_id }
            | Self::MonochromeLightness { layer_id }
            | Self::MonochromeItu { layer_id }
            | Self::GaussianBlur { layer_id, .. }
            | Self::EdgeSobel { layer_id }
            | Self::EdgeLaplacian { layer_id }
            | Self::EdgeLaplacianOfGaussian { layer_id, .. }
            | Self::BucketFill { layer_id, .. }
            | Self::QuadCompression { layer_id, .. } => *layer_id,
        }
    }

    /// Effect parameters as name/value pairs.
    pub fn params(&self) -> Vec<(String, ParamValue)> {
        let p = |name: &str, value: ParamValue| (name.to_string(), value);
        match self {
            Self::GaussianBlur {
                sigma, kernel_size, ..
            }
            | Self::EdgeLaplacianOfGaussian {
                sigma, kernel_size, ..
            } => vec![
                p("sigma", ParamValue::Float(*sigma)),
                p("kernel_size", ParamValue::Int(*kernel_size)),
            ],
            Self::BucketFill {
                x,
                y,
                color,
                threshold,
                ..
            } => vec![
                p("x", ParamValue::Int(*x)),
                p("y", ParamValue::Int(*y)),
                p("color", ParamValue::Color(*color)),
                p("threshold", ParamValue::Float(*threshold)),
            ],
            Self::QuadCompression {
                new_width,
                new_height,
                ..
            } => vec![
                p("new_width", ParamValue::Int(*new_width)),
                p("new_height", ParamValue::Int(*new_height)),
            ],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_tagged_by_effect_name() {
        let op: Operation = serde_json::from_str(
            r#"{"type": "gaussian_blur", "layer_id": 2, "sigma": 1.5, "kernel_size": 5}"#,
        )
        .unwrap();
        assert_eq!(
            op,
            Operation::GaussianBlur {
                layer_id: LayerId(2),
                sigma: 1.5,
                kernel_size: 5
            }
        );
        assert_eq!(op.effect_name(), "gaussian_blur");
        assert_eq!(op.layer_id(), LayerId(2));
    }

    #[test]
    fn type_tag_matches_effect_name() {
        let ops = [
            Operation::grayscale(GrayscaleMethod::Lightness, LayerId(1)),
            Operation::EdgeLaplacianOfGaussian {
                layer_id: LayerId(1),
                sigma: 1.0,
                kernel_size: 3,
            },
            Operation::BucketFill {
                layer_id: LayerId(1),
                x: 0,
                y: 0,
                color: [1, 2, 3, 4],
                threshold: 5.0,
            },
            Operation::QuadCompression {
                layer_id: LayerId(1),
                new_width: 1,
                new_height: 1,
            },
        ];
        for op in ops {
            let json = serde_json::to_value(&op).unwrap();
            assert_eq!(json["type"], op.effect_name());
            let back: Operation = serde_json::from_value(json).unwrap();
            assert_eq!(back, op);
        }
    }

    #[test]
    fn params_carry_payload() {
        let op = Operation::BucketFill {
            layer_id: LayerId(9),
            x: 3,
            y: -1,
            color: [0, 255, 0, 255],
            threshold: 12.5,
        };
        let params = op.params();
        assert_eq!(params.len(), 4);
        assert_eq!(params[1], ("y".to_string(), ParamValue::Int(-1)));
        assert_eq!(params[2], ("color".to_string(), ParamValue::Color([0, 255, 0, 255])));
        assert!(Operation::EdgeSobel { layer_id: LayerId(9) }.params().is_empty());
    }
}
