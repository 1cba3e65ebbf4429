//! `ps-common`: Shared types, traits, and errors for the PixelStack kernel.
//!
//! This crate is the foundation that all other kernel crates depend on.
//! It defines the core abstractions:
//!
//! - **Pixels**: `Pixel` (RGBA8, unpremultiplied) and channel clamping helpers
//! - **Layers**: `Layer` (contiguous row-major grid), `LayerId`, `LayerSource`
//! - **Blending**: `source_over` (shared by the compositor and flood fill)
//! - **Effects**: `EffectCategory`, `ParamDef`, `ParamType`, `ParamValue`
//! - **Errors**: `BufferError` (thiserror-based)
//! - **Config**: `KernelConfig`, `BlurConfig`, `EdgeConfig`, `CompressionConfig`

pub mod blend;
pub mod config;
pub mod effect;
pub mod error;
pub mod layer;
pub mod pixel;
pub mod types;

// Re-export commonly used items at crate root
pub use blend::source_over;
pub use config::{BlurConfig, CompressionConfig, EdgeConfig, GradientNorm, KernelConfig};
pub use effect::{EffectCategory, ParamDef, ParamType, ParamValue};
pub use error::{check_rgba_len, rgba_len, BufferError};
pub use layer::{Layer, LayerSource};
pub use pixel::{clamp_u8, clamp_u8_i32, Pixel};
pub use types::{LayerId, Outcome, Resolution};
