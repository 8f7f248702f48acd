//! Unit and display-format definitions
//!
//! Everything here is plain serializable configuration data. Formatting
//! strategies and conditions are tagged enums dispatched by the resolver and
//! renderer, so a unit definition carries no behavior of its own.

use helm_core::{MarineRegion, MeasurementSystem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a display format turns a converted number into text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FormatStrategy {
    /// Round to a whole number
    IntegerRounding,
    /// Fixed number of decimal places
    FixedDecimal { decimals: u8 },
    /// Digit-template pattern for tabular alignment (e.g. "999.9")
    Pattern { template: String },
    /// Scale and shift before rendering (value * scale + offset)
    AffineFormula { scale: f64, offset: f64, decimals: u8 },
    /// Map the value to the index of the first band it falls below
    BandedLookup { thresholds: Vec<f64> },
    /// Coordinate rendering: degrees and decimal minutes, optionally seconds
    DegreesMinutes { seconds: bool },
    /// Decimal hours rendered as wall-clock time
    ClockTime { twelve_hour: bool },
}

/// Value-range gate deciding whether a format variant applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum FormatCondition {
    ValueBelow { limit: f64 },
    ValueAtLeast { limit: f64 },
}

impl FormatCondition {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            FormatCondition::ValueBelow { limit } => value < *limit,
            FormatCondition::ValueAtLeast { limit } => value >= *limit,
        }
    }
}

/// One display variant of a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFormat {
    pub id: String,
    pub precision: u8,
    /// Gate restricting this variant to a value range; `None` always applies
    pub condition: Option<FormatCondition>,
    pub strategy: FormatStrategy,
    pub is_default: bool,
}

impl DisplayFormat {
    pub fn new(id: &str, precision: u8, strategy: FormatStrategy) -> Self {
        DisplayFormat {
            id: id.to_string(),
            precision,
            condition: None,
            strategy,
            is_default: false,
        }
    }

    pub fn with_condition(mut self, condition: FormatCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Whether this variant may be used for `value`
    pub fn applies_to(&self, value: f64) -> bool {
        self.condition.map_or(true, |c| c.matches(value))
    }
}

/// A unit of measurement within a category
///
/// `factor` and `offset` describe the affine mapping to the category's base
/// unit (`base = value * factor + offset`). The temperature and Beaufort
/// families are intrinsically non-linear and are special-cased by the
/// conversion engine instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub id: String,
    pub symbol: String,
    pub system: MeasurementSystem,
    /// Convertibility partition; conversion across categories is an error
    pub category: String,
    pub factor: f64,
    pub offset: f64,
    /// Default decimal places when no format variant decides otherwise
    pub precision: u8,
    pub formats: Vec<DisplayFormat>,
    /// Region-conventional default format, by region code
    pub region_defaults: HashMap<MarineRegion, String>,
    /// Single formatter kept from older catalogs that predate format variants
    pub legacy_formatter: Option<FormatStrategy>,
}

impl UnitDefinition {
    pub fn new(
        id: &str,
        symbol: &str,
        system: MeasurementSystem,
        category: &str,
        factor: f64,
        precision: u8,
    ) -> Self {
        UnitDefinition {
            id: id.to_string(),
            symbol: symbol.to_string(),
            system,
            category: category.to_string(),
            factor,
            offset: 0.0,
            precision,
            formats: Vec::new(),
            region_defaults: HashMap::new(),
            legacy_formatter: None,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_formats(mut self, formats: Vec<DisplayFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_region_defaults(mut self, defaults: &[(MarineRegion, &str)]) -> Self {
        self.region_defaults = defaults
            .iter()
            .map(|(region, id)| (*region, id.to_string()))
            .collect();
        self
    }

    pub fn with_legacy_formatter(mut self, formatter: FormatStrategy) -> Self {
        self.legacy_formatter = Some(formatter);
        self
    }

    /// The variant flagged as default, if any
    pub fn default_format(&self) -> Option<&DisplayFormat> {
        self.formats.iter().find(|f| f.is_default)
    }

    /// Look up a format variant by id
    pub fn format(&self, id: &str) -> Option<&DisplayFormat> {
        self.formats.iter().find(|f| f.id == id)
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
