//! Effect-specific error types.

use thiserror::Error;

/// Errors from the effect system.
///
/// Only parameter and registry problems are errors. Unknown layers and
/// out-of-bounds seeds are reported through [`ps_common::Outcome`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    /// An unknown parameter name was supplied.
    #[error("Unknown parameter '{param}' for effect '{effect}'")]
    UnknownParam { effect: String, param: String },

    /// A numeric parameter is outside its valid range.
    #[error("Parameter '{param}' value {value} out of range [{min}, {max}]")]
    ParamOutOfRange {
        param: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value has the wrong type.
    #[error("Parameter '{param}' type mismatch: expected {expected}, got {got}")]
    ParamTypeMismatch {
        param: String,
        expected: String,
        got: String,
    },

    /// The requested effect was not found in the registry.
    #[error("Effect not found: {name}")]
    NotFound { name: String },

    /// An effect with this name is already registered.
    #[error("Effect already registered: {name}")]
    AlreadyRegistered { name: String },
}
