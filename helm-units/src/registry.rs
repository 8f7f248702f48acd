//! Unit registry - the marine instrument catalog organized by category
//!
//! The registry is built once, injected into the engine and resolver, and
//! never mutated afterwards. Lookups are O(1).
//!
//! Ids may repeat across categories (the catalog defines `meter` for both
//! `distance` and `depth`, with different precision and formats). A bare
//! [`UnitRegistry::lookup`] returns the first-registered match in catalog
//! order; [`UnitRegistry::lookup_in`] disambiguates by category.

use crate::unit::{DisplayFormat, FormatCondition, FormatStrategy, UnitDefinition};
use helm_core::{MarineRegion, MeasurementSystem};
use std::collections::HashMap;

use MeasurementSystem::{Imperial, Metric, Nautical};

/// Immutable catalog of unit definitions grouped by category and system
pub struct UnitRegistry {
    units: Vec<UnitDefinition>,
    by_id: HashMap<String, usize>,
    by_category_id: HashMap<(String, String), usize>,
    category_order: Vec<String>,
    by_category: HashMap<String, Vec<usize>>,
}

impl UnitRegistry {
    /// Create an empty registry (useful for tests with bespoke catalogs)
    pub fn empty() -> Self {
        UnitRegistry {
            units: Vec::new(),
            by_id: HashMap::new(),
            by_category_id: HashMap::new(),
            category_order: Vec::new(),
            by_category: HashMap::new(),
        }
    }

    /// Build the standard marine instrument catalog
    pub fn marine_catalog() -> Self {
        let mut registry = UnitRegistry::empty();
        registry.register_distance_units();
        registry.register_depth_units();
        registry.register_vessel_speed_units();
        registry.register_wind_speed_units();
        registry.register_temperature_units();
        registry.register_pressure_units();
        registry.register_angle_units();
        registry.register_coordinate_units();
        registry.register_voltage_units();
        registry.register_time_format_units();
        registry
    }

    /// Get a unit by id; first categorical registration wins on duplicates
    pub fn lookup(&self, id: &str) -> Option<&UnitDefinition> {
        self.by_id.get(id).map(|&i| &self.units[i])
    }

    /// Get a unit by (category, id), disambiguating duplicate ids
    pub fn lookup_in(&self, category: &str, id: &str) -> Option<&UnitDefinition> {
        self.by_category_id
            .get(&(category.to_string(), id.to_string()))
            .map(|&i| &self.units[i])
    }

    /// All units in a category, in registration order
    pub fn units_in_category(&self, category: &str) -> Vec<&UnitDefinition> {
        self.by_category
            .get(category)
            .map(|ids| ids.iter().map(|&i| &self.units[i]).collect())
            .unwrap_or_default()
    }

    /// First unit registered in a category, the best-effort fallback unit
    pub fn first_in_category(&self, category: &str) -> Option<&UnitDefinition> {
        self.by_category
            .get(category)
            .and_then(|ids| ids.first())
            .map(|&i| &self.units[i])
    }

    /// All category keys, in registration order
    pub fn categories(&self) -> Vec<&str> {
        self.category_order.iter().map(|s| s.as_str()).collect()
    }

    pub fn register(&mut self, unit: UnitDefinition) {
        let index = self.units.len();
        self.by_id.entry(unit.id.clone()).or_insert(index);
        self.by_category_id
            .insert((unit.category.clone(), unit.id.clone()), index);
        if !self.by_category.contains_key(&unit.category) {
            self.category_order.push(unit.category.clone());
        }
        self.by_category
            .entry(unit.category.clone())
            .or_default()
            .push(index);
        self.units.push(unit);
    }

    fn register_distance_units(&mut self) {
        self.register(
            UnitDefinition::new("nautical_mile", "nm", Nautical, "distance", 1852.0, 1)
                .with_formats(vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()]),
        );
        self.register(
            UnitDefinition::new("kilometer", "km", Metric, "distance", 1000.0, 1).with_formats(
                vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()],
            ),
        );
        self.register(
            UnitDefinition::new("mile", "mi", Imperial, "distance", 1609.344, 1).with_formats(
                vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()],
            ),
        );
        // Base unit of the category; shadowed for bare lookup by nothing,
        // but shadows the depth meter registered later.
        self.register(UnitDefinition::new("meter", "m", Metric, "distance", 1.0, 0));
    }

    fn register_depth_units(&mut self) {
        self.register(
            UnitDefinition::new("meter", "m", Metric, "depth", 1.0, 1).with_formats(vec![
                DisplayFormat::new("decimal", 1, FormatStrategy::FixedDecimal { decimals: 1 })
                    .as_default(),
                DisplayFormat::new("integer", 0, FormatStrategy::IntegerRounding)
                    .with_condition(FormatCondition::ValueAtLeast { limit: 100.0 }),
            ]),
        );
        self.register(
            UnitDefinition::new("feet", "ft", Imperial, "depth", 0.3048, 0).with_formats(vec![
                DisplayFormat::new("integer", 0, FormatStrategy::IntegerRounding).as_default(),
            ]),
        );
        self.register(
            UnitDefinition::new("fathom", "fm", Nautical, "depth", 1.8288, 1).with_formats(vec![
                DisplayFormat::new("decimal", 1, FormatStrategy::FixedDecimal { decimals: 1 })
                    .as_default(),
            ]),
        );
    }

    fn register_vessel_speed_units(&mut self) {
        // Base is the knot
        self.register(
            UnitDefinition::new("knots", "kts", Nautical, "vessel_speed", 1.0, 1).with_formats(
                vec![
                    DisplayFormat::new("decimal", 1, FormatStrategy::FixedDecimal { decimals: 1 })
                        .as_default(),
                    DisplayFormat::new("integer", 0, FormatStrategy::IntegerRounding),
                ],
            ),
        );
        self.register(
            UnitDefinition::new("kmh_vessel", "km/h", Metric, "vessel_speed", 0.539957, 1)
                .with_formats(vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()]),
        );
        self.register(
            UnitDefinition::new("mph_vessel", "mph", Imperial, "vessel_speed", 0.868976, 1)
                .with_formats(vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()]),
        );
    }

    fn register_wind_speed_units(&mut self) {
        // Base is the knot; Beaufort is banded and handled by the engine
        self.register(
            UnitDefinition::new("knots_wind", "kts", Nautical, "wind_speed", 1.0, 1)
                .with_formats(vec![
                    DisplayFormat::new("decimal", 1, FormatStrategy::FixedDecimal { decimals: 1 })
                        .as_default(),
                    DisplayFormat::new("integer", 0, FormatStrategy::IntegerRounding)
                        .with_condition(FormatCondition::ValueBelow { limit: 10.0 }),
                ])
                .with_region_defaults(&[
                    (MarineRegion::Eu, "decimal"),
                    (MarineRegion::Us, "integer"),
                    (MarineRegion::Uk, "decimal"),
                    (MarineRegion::International, "decimal"),
                ]),
        );
        self.register(
            UnitDefinition::new("ms_wind", "m/s", Metric, "wind_speed", 1.943_844_49, 1)
                .with_formats(vec![
                    DisplayFormat::new("integer", 0, FormatStrategy::IntegerRounding)
                        .with_condition(FormatCondition::ValueAtLeast { limit: 10.0 }),
                    DisplayFormat::new("decimal", 1, FormatStrategy::FixedDecimal { decimals: 1 })
                        .as_default(),
                ]),
        );
        self.register(UnitDefinition::new(
            "kmh_wind", "km/h", Metric, "wind_speed", 0.539957, 0,
        ));
        self.register(UnitDefinition::new(
            "mph_wind", "mph", Imperial, "wind_speed", 0.868976, 0,
        ));
        self.register(
            UnitDefinition::new("beaufort", "Bft", Nautical, "wind_speed", 1.0, 0)
                .with_legacy_formatter(FormatStrategy::IntegerRounding),
        );
    }

    fn register_temperature_units(&mut self) {
        // Base is Celsius; the engine converts with explicit affine formulas
        self.register(
            UnitDefinition::new("celsius", "°C", Metric, "temperature", 1.0, 1).with_formats(
                vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()],
            ),
        );
        self.register(
            UnitDefinition::new("fahrenheit", "°F", Imperial, "temperature", 5.0 / 9.0, 1)
                .with_offset(-160.0 / 9.0)
                .with_formats(vec![DisplayFormat::new(
                    "decimal",
                    1,
                    FormatStrategy::FixedDecimal { decimals: 1 },
                )
                .as_default()]),
        );
    }

    fn register_pressure_units(&mut self) {
        // Base is the hectopascal
        self.register(
            UnitDefinition::new("hpa", "hPa", Metric, "pressure", 1.0, 0).with_formats(vec![
                DisplayFormat::new("integer", 0, FormatStrategy::IntegerRounding).as_default(),
            ]),
        );
        self.register(UnitDefinition::new("mbar", "mb", Metric, "pressure", 1.0, 0));
        self.register(UnitDefinition::new("bar", "bar", Metric, "pressure", 1000.0, 3));
        self.register(
            UnitDefinition::new("inhg", "inHg", Imperial, "pressure", 33.8639, 2).with_formats(
                vec![DisplayFormat::new(
                    "decimal",
                    2,
                    FormatStrategy::FixedDecimal { decimals: 2 },
                )
                .as_default()],
            ),
        );
        self.register(UnitDefinition::new("mmhg", "mmHg", Metric, "pressure", 1.33322, 0));
    }

    fn register_angle_units(&mut self) {
        self.register(
            UnitDefinition::new("degrees", "°", Nautical, "angle", 1.0, 0).with_formats(vec![
                DisplayFormat::new(
                    "integer",
                    0,
                    FormatStrategy::Pattern { template: "999".to_string() },
                )
                .as_default(),
            ]),
        );
        self.register(UnitDefinition::new(
            "radians",
            "rad",
            Metric,
            "angle",
            57.295_779_513_082_32,
            2,
        ));
    }

    fn register_coordinate_units(&mut self) {
        self.register(
            UnitDefinition::new("decimal_degrees", "°", Nautical, "coordinates", 1.0, 5)
                .with_formats(vec![
                    DisplayFormat::new("decimal", 5, FormatStrategy::FixedDecimal { decimals: 5 })
                        .as_default(),
                    DisplayFormat::new(
                        "degrees_minutes",
                        3,
                        FormatStrategy::DegreesMinutes { seconds: false },
                    ),
                    DisplayFormat::new("dms", 1, FormatStrategy::DegreesMinutes { seconds: true }),
                ])
                .with_region_defaults(&[
                    (MarineRegion::Us, "degrees_minutes"),
                    (MarineRegion::International, "degrees_minutes"),
                ]),
        );
    }

    fn register_voltage_units(&mut self) {
        self.register(
            UnitDefinition::new("volt", "V", Metric, "voltage", 1.0, 1).with_formats(vec![
                DisplayFormat::new("decimal", 1, FormatStrategy::FixedDecimal { decimals: 1 })
                    .as_default(),
            ]),
        );
    }

    fn register_time_format_units(&mut self) {
        self.register(
            UnitDefinition::new("time_24h", "h", Metric, "time_format", 1.0, 0).with_formats(
                vec![DisplayFormat::new(
                    "clock",
                    0,
                    FormatStrategy::ClockTime { twelve_hour: false },
                )
                .as_default()],
            ),
        );
        self.register(
            UnitDefinition::new("time_12h", "h", Imperial, "time_format", 1.0, 0).with_formats(
                vec![DisplayFormat::new(
                    "clock",
                    0,
                    FormatStrategy::ClockTime { twelve_hour: true },
                )
                .as_default()],
            ),
        );
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        UnitRegistry::marine_catalog()
    }
}
