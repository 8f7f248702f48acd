//! Helm Units - Marine Measurement Conversion and Formatting
//!
//! Converts raw instrument telemetry into display-ready strings: unit
//! conversion through per-category base units, display-format resolution by
//! value, region and preference, and fixed-width rendering for instrument
//! screens.
//!
//! Categories:
//! - Distance (nm, km, mi, m)
//! - Depth (m, ft, fm)
//! - Vessel speed (kts, km/h, mph)
//! - Wind speed (kts, m/s, km/h, mph, Bft)
//! - Temperature (°C, °F)
//! - Pressure (hPa, mb, bar, inHg, mmHg)
//! - Angle (°, rad)
//! - Coordinates (decimal degrees, degrees-minutes, DMS)
//! - Voltage (V)
//! - Time format (24h, 12h)
//!
//! The [`PreferenceStore`] is the facade a host application talks to; the
//! registry, engine, cache and renderer underneath are usable on their own.

mod cache;
mod convert;
mod pattern;
mod prefs;
mod registry;
mod resolve;
mod unit;

pub use cache::{ConversionCache, DEFAULT_CACHE_CAPACITY};
pub use convert::{
    beaufort_to_knots, convert, convert_in, knots_to_beaufort, BEAUFORT_MIDPOINTS_KN,
};
pub use pattern::{format_to_pattern, render_strategy};
pub use prefs::{
    ConversionPreference, Converted, FormatOptions, FormattedValue, PreferenceSnapshot,
    PreferenceStore, TextAlign, WidthHints, PLACEHOLDER,
};
pub use registry::UnitRegistry;
pub use resolve::resolve_format;
pub use unit::{DisplayFormat, FormatCondition, FormatStrategy, UnitDefinition};

pub use helm_core::{ConversionError, MarineRegion, MeasurementSystem, RoundingMode};
