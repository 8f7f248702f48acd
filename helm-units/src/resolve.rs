//! Display-format resolution
//!
//! Picks which of a unit's format variants applies to a value, a region and
//! an optional explicit or preferred format id. Pure over the unit
//! definition; the preference store feeds in its stored state.

use crate::unit::{DisplayFormat, FormatStrategy, UnitDefinition};
use helm_core::MarineRegion;

/// Choose the display format for `value` on `unit`
///
/// Resolution order, first match wins:
/// 1. `explicit_format`, if the unit carries it
/// 2. `preferred_format`, if its condition holds for `value`; on a failed
///    condition, a sibling variant whose condition matches is tried before
///    falling through
/// 3. the unit's regional default for `region`
/// 4. the variant flagged as default
/// 5. the unit's legacy single formatter
/// 6. fixed-decimal rendering at the unit's raw precision
pub fn resolve_format(
    unit: &UnitDefinition,
    value: f64,
    region: MarineRegion,
    preferred_format: Option<&str>,
    explicit_format: Option<&str>,
) -> DisplayFormat {
    if let Some(format) = explicit_format.and_then(|id| unit.format(id)) {
        return format.clone();
    }

    if let Some(preferred) = preferred_format.and_then(|id| unit.format(id)) {
        if preferred.applies_to(value) {
            return preferred.clone();
        }
        // Conditions partition the unit's formats by value range; a failed
        // condition means a sibling owns this range.
        if let Some(sibling) = unit
            .formats
            .iter()
            .find(|f| f.id != preferred.id && f.applies_to(value))
        {
            return sibling.clone();
        }
    }

    if let Some(format) = unit
        .region_defaults
        .get(&region)
        .and_then(|id| unit.format(id))
    {
        return format.clone();
    }

    if let Some(format) = unit.default_format() {
        return format.clone();
    }

    if let Some(legacy) = &unit.legacy_formatter {
        return DisplayFormat::new("legacy", unit.precision, legacy.clone());
    }

    DisplayFormat::new(
        "raw",
        unit.precision,
        FormatStrategy::FixedDecimal { decimals: unit.precision },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UnitRegistry;

    fn wind_unit(reg: &UnitRegistry) -> &UnitDefinition {
        reg.lookup_in("wind_speed", "knots_wind").unwrap()
    }

    #[test]
    fn test_explicit_format_wins() {
        let reg = UnitRegistry::marine_catalog();
        let unit = wind_unit(&reg);

        let resolved = resolve_format(
            unit,
            5.0,
            MarineRegion::Eu,
            Some("decimal"),
            Some("integer"),
        );
        assert_eq!(resolved.id, "integer");
    }

    #[test]
    fn test_preferred_format_condition_gates() {
        let reg = UnitRegistry::marine_catalog();
        let unit = wind_unit(&reg);

        // Below 10 the integer preference holds
        let resolved = resolve_format(unit, 8.0, MarineRegion::Us, Some("integer"), None);
        assert_eq!(resolved.id, "integer");

        // At 10 and above its condition fails and the decimal sibling takes over
        let resolved = resolve_format(unit, 15.0, MarineRegion::Us, Some("integer"), None);
        assert_eq!(resolved.id, "decimal");
    }

    #[test]
    fn test_regional_default() {
        let reg = UnitRegistry::marine_catalog();
        let unit = wind_unit(&reg);

        let resolved = resolve_format(unit, 5.0, MarineRegion::Us, None, None);
        assert_eq!(resolved.id, "integer");

        let resolved = resolve_format(unit, 5.0, MarineRegion::Eu, None, None);
        assert_eq!(resolved.id, "decimal");
    }

    #[test]
    fn test_default_flag_fallback() {
        let reg = UnitRegistry::marine_catalog();
        let unit = reg.lookup_in("vessel_speed", "knots").unwrap();

        // No regional defaults on the vessel knots unit
        let resolved = resolve_format(unit, 12.0, MarineRegion::Us, None, None);
        assert_eq!(resolved.id, "decimal");
        assert!(resolved.is_default);
    }

    #[test]
    fn test_legacy_formatter_fallback() {
        let reg = UnitRegistry::marine_catalog();
        let unit = reg.lookup_in("wind_speed", "beaufort").unwrap();

        let resolved = resolve_format(unit, 6.0, MarineRegion::International, None, None);
        assert_eq!(resolved.id, "legacy");
        assert_eq!(resolved.strategy, FormatStrategy::IntegerRounding);
    }

    #[test]
    fn test_raw_precision_fallback() {
        let reg = UnitRegistry::marine_catalog();
        // kmh_wind carries no formats, no regional defaults, no legacy formatter
        let unit = reg.lookup_in("wind_speed", "kmh_wind").unwrap();

        let resolved = resolve_format(unit, 22.0, MarineRegion::International, None, None);
        assert_eq!(resolved.id, "raw");
        assert_eq!(resolved.strategy, FormatStrategy::FixedDecimal { decimals: 0 });
    }
}
