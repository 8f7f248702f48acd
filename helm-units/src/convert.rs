//! Pure conversion engine
//!
//! Linear units convert through the category base
//! (`base = value * factor + offset`). Two families bypass that model:
//! temperature (explicit Celsius/Fahrenheit formulas) and the Beaufort wind
//! scale (banded lookup, lossy towards Beaufort).

use crate::registry::UnitRegistry;
use crate::unit::UnitDefinition;
use helm_core::ConversionError;

/// Representative knot speed for each Beaufort force 0-12
pub const BEAUFORT_MIDPOINTS_KN: [f64; 13] = [
    0.5, 2.5, 5.5, 9.0, 13.5, 19.0, 25.0, 31.5, 37.5, 44.5, 52.0, 60.0, 68.0,
];

/// Lower knot bound of each Beaufort force 1-12
const BEAUFORT_THRESHOLDS_KN: [f64; 12] = [
    1.0, 4.0, 7.0, 11.0, 16.0, 22.0, 28.0, 34.0, 41.0, 48.0, 56.0, 64.0,
];

const BEAUFORT_ID: &str = "beaufort";

/// Band a knot speed into a Beaufort force 0-12
pub fn knots_to_beaufort(knots: f64) -> u8 {
    BEAUFORT_THRESHOLDS_KN
        .iter()
        .take_while(|&&threshold| knots >= threshold)
        .count() as u8
}

/// Representative knot speed for a Beaufort force, clamped to 0-12
///
/// Lossy inverse of [`knots_to_beaufort`]: a whole band collapses to its
/// midpoint.
pub fn beaufort_to_knots(force: f64) -> f64 {
    let index = force.round().clamp(0.0, 12.0) as usize;
    BEAUFORT_MIDPOINTS_KN[index]
}

/// Convert `value` between two units of the registry
///
/// Same-unit conversion returns the value unchanged without touching the
/// registry. Unknown ids and category mismatches are errors; the output
/// depends only on the inputs and the registry.
pub fn convert(
    registry: &UnitRegistry,
    value: f64,
    from_id: &str,
    to_id: &str,
) -> Result<f64, ConversionError> {
    if from_id == to_id {
        return Ok(value);
    }
    if !value.is_finite() {
        return Err(ConversionError::InvalidValue);
    }

    let from = registry
        .lookup(from_id)
        .ok_or_else(|| ConversionError::unknown_unit(from_id))?;
    let to = registry
        .lookup(to_id)
        .ok_or_else(|| ConversionError::unknown_unit(to_id))?;

    convert_resolved(value, from, to)
}

/// Convert with lookups scoped to `category` first
///
/// Ids may repeat across categories (`meter` in distance and depth); callers
/// that know the category use this to reach the shadowed unit. Ids not found
/// in the category fall back to the bare lookup.
pub fn convert_in(
    registry: &UnitRegistry,
    category: &str,
    value: f64,
    from_id: &str,
    to_id: &str,
) -> Result<f64, ConversionError> {
    if from_id == to_id {
        return Ok(value);
    }
    if !value.is_finite() {
        return Err(ConversionError::InvalidValue);
    }

    let from = registry
        .lookup_in(category, from_id)
        .or_else(|| registry.lookup(from_id))
        .ok_or_else(|| ConversionError::unknown_unit(from_id))?;
    let to = registry
        .lookup_in(category, to_id)
        .or_else(|| registry.lookup(to_id))
        .ok_or_else(|| ConversionError::unknown_unit(to_id))?;

    convert_resolved(value, from, to)
}

fn convert_resolved(
    value: f64,
    from: &UnitDefinition,
    to: &UnitDefinition,
) -> Result<f64, ConversionError> {
    if from.category != to.category {
        return Err(ConversionError::CategoryMismatch {
            from: from.id.clone(),
            from_category: from.category.clone(),
            to: to.id.clone(),
            to_category: to.category.clone(),
        });
    }

    if from.category == "temperature" {
        return Ok(convert_temperature(value, from, to));
    }

    if from.id == BEAUFORT_ID {
        // Beaufort -> knots (band midpoint), then linear to the target
        let knots = beaufort_to_knots(value);
        return Ok(knots / to.factor);
    }
    if to.id == BEAUFORT_ID {
        let knots = value * from.factor;
        return Ok(knots_to_beaufort(knots) as f64);
    }

    let base = value * from.factor + from.offset;
    Ok((base - to.offset) / to.factor)
}

fn convert_temperature(value: f64, from: &UnitDefinition, to: &UnitDefinition) -> f64 {
    match (from.id.as_str(), to.id.as_str()) {
        ("celsius", "fahrenheit") => value * 9.0 / 5.0 + 32.0,
        ("fahrenheit", "celsius") => (value - 32.0) * 5.0 / 9.0,
        // Any other temperature pair falls back to the affine catalog data
        _ => {
            let base = value * from.factor + from.offset;
            (base - to.offset) / to.factor
        }
    }
}
