//! Parameter validation and conversion helpers.

use ps_common::{ParamDef, ParamType, ParamValue};

use crate::error::EffectError;

/// Validate parameter values against their definitions.
///
/// Checks that:
/// - Every supplied parameter has a matching definition
/// - Float/Int values are within their defined ranges
/// - Value types match the parameter type (an `Int` is accepted for a `Float`)
pub fn validate_params(
    effect: &str,
    defs: &[ParamDef],
    params: &[(String, ParamValue)],
) -> Result<(), EffectError> {
    for (name, value) in params {
        let def = defs
            .iter()
            .find(|d| d.name == *name)
            .ok_or_else(|| EffectError::UnknownParam {
                effect: effect.to_string(),
                param: name.clone(),
            })?;

        validate_single_param(def, value)?;
    }
    Ok(())
}

fn out_of_range(def: &ParamDef, value: f64, min: f64, max: f64) -> EffectError {
    EffectError::ParamOutOfRange {
        param: def.name.clone(),
        value,
        min,
        max,
    }
}

/// Validate a single parameter value against its definition.
fn validate_single_param(def: &ParamDef, value: &ParamValue) -> Result<(), EffectError> {
    match (&def.param_type, value) {
        (ParamType::Float { min, max }, ParamValue::Float(_) | ParamValue::Int(_)) => {
            let v = value.as_float().unwrap_or(f32::NAN);
            // NaN fails both comparisons, so check the accepted range directly.
            if !(v >= *min && v <= *max) {
                return Err(out_of_range(def, v as f64, *min as f64, *max as f64));
            }
        }
        (ParamType::Int { min, max }, ParamValue::Int(v)) => {
            if *v < *min || *v > *max {
                return Err(out_of_range(def, *v as f64, *min as f64, *max as f64));
            }
        }
        (ParamType::Color, ParamValue::Color(_)) => {}
        _ => {
            return Err(EffectError::ParamTypeMismatch {
                param: def.name.clone(),
                expected: format!("{:?}", def.param_type),
                got: format!("{value:?}"),
            });
        }
    }
    Ok(())
}

/// Get a parameter value from the supplied params, falling back to the default.
///
/// Returns `None` only if the parameter name is not found in either `params` or `defs`.
pub fn get_param_or_default<'a>(
    name: &str,
    params: &'a [(String, ParamValue)],
    defs: &'a [ParamDef],
) -> Option<&'a ParamValue> {
    params
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .or_else(|| defs.iter().find(|d| d.name == name).map(|d| &d.default))
}

/// Float parameter, with fallback to default.
pub fn get_float(name: &str, params: &[(String, ParamValue)], defs: &[ParamDef]) -> f32 {
    get_param_or_default(name, params, defs)
        .and_then(ParamValue::as_float)
        .unwrap_or(0.0)
}

/// Int parameter, with fallback to default.
pub fn get_int(name: &str, params: &[(String, ParamValue)], defs: &[ParamDef]) -> i32 {
    get_param_or_default(name, params, defs)
        .and_then(ParamValue::as_int)
        .unwrap_or(0)
}

/// Color parameter, with fallback to default (transparent black).
pub fn get_color(name: &str, params: &[(String, ParamValue)], defs: &[ParamDef]) -> [u8; 4] {
    get_param_or_default(name, params, defs)
        .and_then(ParamValue::as_color)
        .unwrap_or([0, 0, 0, 0])
}

/// Shorthand for building a [`ParamDef`].
pub(crate) fn def(name: &str, display_name: &str, param_type: ParamType, default: ParamValue) -> ParamDef {
    ParamDef {
        name: name.to_string(),
        display_name: display_name.to_string(),
        param_type,
        default,
    }
}
