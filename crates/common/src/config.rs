//! Configuration structs for the filter and compression stages.

use serde::{Deserialize, Serialize};

/// How the Sobel stage combines the two gradient components.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientNorm {
    /// `sqrt(gx² + gy²)`.
    #[default]
    Euclidean,
    /// `|gx| + |gy|` (cheaper, slightly larger response on diagonals).
    Manhattan,
}

/// Gaussian blur parameter limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Largest sigma accepted through the parameter interface.
    pub max_sigma: f32,
    /// Largest kernel size accepted through the parameter interface.
    pub max_kernel_size: i32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            max_sigma: 50.0,
            max_kernel_size: 50,
        }
    }
}

/// Edge detection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub gradient_norm: GradientNorm,
    /// Multiplier applied to the Laplacian response before clamping.
    pub laplacian_gain: i32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            gradient_norm: GradientNorm::Euclidean,
            laplacian_gain: 3,
        }
    }
}

/// Quad-tree compression stopping rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Recursion depth at which a node is always filled.
    pub max_depth: u32,
    /// Largest per-channel deviation from the mean for a uniform node.
    pub uniformity_threshold: u8,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            uniformity_threshold: 10,
        }
    }
}

/// Top-level kernel configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub blur: BlurConfig,
    pub edge: EdgeConfig,
    pub compression: CompressionConfig,
}
