//! Effect trait definition.
//!
//! Every layer operation the kernel exposes by name implements [`Effect`],
//! which describes its parameters and applies it to a layer in place.

use ps_common::{EffectCategory, Layer, Outcome, ParamDef, ParamValue};

use crate::error::EffectError;

/// Trait for all layer effects.
///
/// Implementations hold whatever configuration they were built with and are
/// otherwise stateless; `apply` mutates only the layer it is given.
pub trait Effect: Send + Sync {
    /// Unique effect name (the operation name used by hosts).
    fn name(&self) -> &str;

    /// Display name for UI.
    fn display_name(&self) -> &str;

    /// Category for UI grouping.
    fn category(&self) -> EffectCategory;

    /// Parameter definitions (for UI generation and validation).
    fn param_defs(&self) -> &[ParamDef];

    /// Apply the effect to `layer` in place.
    ///
    /// `params` are expected to have passed
    /// [`validate_params`](crate::params::validate_params); missing entries
    /// fall back to their defaults.
    fn apply(
        &self,
        layer: &mut Layer,
        params: &[(String, ParamValue)],
    ) -> Result<Outcome, EffectError>;
}
