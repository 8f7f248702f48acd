//! Preference store - the public facade of the engine
//!
//! Holds one preference record per category, composes the cache, resolver
//! and pattern renderer, and degrades to `"---"` placeholders instead of
//! failing. Conversion failures surface through an `on_error` side-channel;
//! no facade call panics on malformed input.

use crate::cache::ConversionCache;
use crate::pattern::{format_to_pattern, render_strategy};
use crate::registry::UnitRegistry;
use crate::resolve::resolve_format;
use crate::unit::UnitDefinition;
use helm_core::{ConversionError, MarineRegion, MeasurementSystem, RoundingMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Shown when a value cannot be converted or formatted
pub const PLACEHOLDER: &str = "---";

/// Per-category display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPreference {
    pub category: String,
    pub preferred_unit: String,
    pub preferred_format: Option<String>,
    pub marine_region: MarineRegion,
    /// Overrides the resolved format's decimal count when set
    pub display_precision: Option<u8>,
    /// Append the source reading alongside the converted one
    pub show_both_units: bool,
    pub rounding_mode: RoundingMode,
}

impl ConversionPreference {
    fn new(category: &str, preferred_unit: &str, region: MarineRegion) -> Self {
        ConversionPreference {
            category: category.to_string(),
            preferred_unit: preferred_unit.to_string(),
            preferred_format: None,
            marine_region: region,
            display_precision: None,
            show_both_units: false,
            rounding_mode: RoundingMode::default(),
        }
    }
}

/// Flat persistence record, the only wire format the engine defines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    pub category: String,
    pub preferred_unit: String,
    pub preferred_format: Option<String>,
    pub marine_region: MarineRegion,
}

/// A converted value tagged with the unit it is now expressed in
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub value: f64,
    pub unit: String,
}

/// Ready-to-render value/unit string pair
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedValue {
    pub value: String,
    pub unit: String,
}

/// Options for the formatting facade
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Explicit format variant, step 1 of resolution
    pub format_id: Option<String>,
    /// Decimal-count override, ahead of the preference's display precision
    pub precision: Option<u8>,
    /// Suppress the trailing unit symbol
    pub hide_symbol: bool,
}

/// Horizontal alignment hint for tabular readouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
}

/// Layout hints for fixed-width rendering of a category
#[derive(Debug, Clone, PartialEq)]
pub struct WidthHints {
    pub min_width: usize,
    pub text_align: TextAlign,
    pub letter_spacing: Option<f32>,
    pub format_pattern: Option<String>,
}

type ErrorHandler = Box<dyn Fn(&ConversionError) + Send + Sync>;

/// Orchestrator over the registry, cache, resolver and renderer
///
/// The only mutable state in the engine: the preference map and the cache.
/// All methods are synchronous; in a multi-threaded host wrap the store in
/// its own mutex so the cache's insert-then-evict sequence stays atomic.
pub struct PreferenceStore {
    registry: UnitRegistry,
    preferences: HashMap<String, ConversionPreference>,
    region: MarineRegion,
    cache: ConversionCache,
    on_error: Option<ErrorHandler>,
}

impl PreferenceStore {
    pub fn new(registry: UnitRegistry) -> Self {
        PreferenceStore {
            registry,
            preferences: HashMap::new(),
            region: MarineRegion::default(),
            cache: ConversionCache::default(),
            on_error: None,
        }
    }

    /// Install a side-channel receiving every reported conversion error
    pub fn with_error_handler(
        mut self,
        handler: impl Fn(&ConversionError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn marine_region(&self) -> MarineRegion {
        self.region
    }

    // ========== Configuration surface ==========

    /// Bulk-assign every category's preferred unit from a system preset
    pub fn set_system(&mut self, system: MeasurementSystem) {
        debug!(%system, "applying system preset");
        for &(category, unit_id) in system_defaults(system) {
            if let Err(err) = self.set_preferred_unit(category, unit_id) {
                // Preset tables reference catalog units; a miss means a
                // stripped-down registry was injected.
                self.report(&err);
            }
        }
    }

    /// Set a category's preferred unit and re-resolve its regional format
    pub fn set_preferred_unit(
        &mut self,
        category: &str,
        unit_id: &str,
    ) -> Result<(), ConversionError> {
        let unit = self
            .registry
            .lookup_in(category, unit_id)
            .ok_or_else(|| ConversionError::unknown_unit(unit_id))?;
        let format = regional_format(unit, self.region);

        debug!(category, unit_id, "preferred unit updated");
        let region = self.region;
        let pref = self
            .preferences
            .entry(category.to_string())
            .or_insert_with(|| ConversionPreference::new(category, unit_id, region));
        pref.preferred_unit = unit_id.to_string();
        pref.preferred_format = format;
        pref.marine_region = region;
        Ok(())
    }

    /// Pin a format variant for a category's preferred unit
    pub fn set_preferred_format(
        &mut self,
        category: &str,
        format_id: &str,
    ) -> Result<(), ConversionError> {
        let unit_id = self
            .preferred_unit_id(category)
            .map(str::to_string)
            .ok_or_else(|| ConversionError::unknown_unit(category))?;
        let pref = self.ensure_preference(category, &unit_id);
        pref.preferred_format = Some(format_id.to_string());
        Ok(())
    }

    /// Switch region and re-resolve every preference's format against it
    pub fn set_marine_region(&mut self, region: MarineRegion) {
        debug!(%region, "marine region changed");
        self.region = region;
        let ids: Vec<(String, String)> = self
            .preferences
            .values()
            .map(|p| (p.category.clone(), p.preferred_unit.clone()))
            .collect();
        for (category, unit_id) in ids {
            let format = self
                .registry
                .lookup_in(&category, &unit_id)
                .and_then(|unit| regional_format(unit, region));
            if let Some(pref) = self.preferences.get_mut(&category) {
                pref.preferred_format = format;
                pref.marine_region = region;
            }
        }
    }

    pub fn set_display_precision(&mut self, category: &str, precision: Option<u8>) {
        if let Some(unit_id) = self.preferred_unit_id(category).map(str::to_string) {
            self.ensure_preference(category, &unit_id).display_precision = precision;
        }
    }

    pub fn set_show_both_units(&mut self, category: &str, show_both: bool) {
        if let Some(unit_id) = self.preferred_unit_id(category).map(str::to_string) {
            self.ensure_preference(category, &unit_id).show_both_units = show_both;
        }
    }

    pub fn set_rounding_mode(&mut self, category: &str, mode: RoundingMode) {
        if let Some(unit_id) = self.preferred_unit_id(category).map(str::to_string) {
            self.ensure_preference(category, &unit_id).rounding_mode = mode;
        }
    }

    /// The category's preferred unit id, falling back to the first unit
    /// registered in the category (best-effort, see DESIGN notes)
    pub fn get_preferred_unit(&self, category: &str) -> Option<&str> {
        self.preferred_unit_id(category)
    }

    /// The format id the category/unit pair currently resolves to
    pub fn get_preferred_format(&self, category: &str, unit_id: &str) -> Option<String> {
        if let Some(pref) = self.preferences.get(category) {
            if pref.preferred_unit == unit_id {
                return pref.preferred_format.clone();
            }
        }
        self.registry
            .lookup_in(category, unit_id)
            .and_then(|unit| regional_format(unit, self.region))
    }

    pub fn reset_preferences(&mut self) {
        self.preferences.clear();
        self.region = MarineRegion::default();
        self.cache.clear();
    }

    // ========== Persistence boundary ==========

    /// Snapshot all preference records for an external store
    pub fn export_preferences(&self) -> Vec<PreferenceSnapshot> {
        let mut snapshots: Vec<PreferenceSnapshot> = self
            .preferences
            .values()
            .map(|p| PreferenceSnapshot {
                category: p.category.clone(),
                preferred_unit: p.preferred_unit.clone(),
                preferred_format: p.preferred_format.clone(),
                marine_region: p.marine_region,
            })
            .collect();
        snapshots.sort_by(|a, b| a.category.cmp(&b.category));
        snapshots
    }

    /// Restore records from an external store
    ///
    /// Records naming units absent from the registry are skipped with a
    /// warning; the store's region follows the restored records.
    pub fn import_preferences(&mut self, snapshots: Vec<PreferenceSnapshot>) {
        if let Some(region) = snapshots.first().map(|s| s.marine_region) {
            self.region = region;
        }
        for snapshot in snapshots {
            if self
                .registry
                .lookup_in(&snapshot.category, &snapshot.preferred_unit)
                .is_none()
            {
                warn!(
                    category = %snapshot.category,
                    unit = %snapshot.preferred_unit,
                    "skipping preference for unknown unit"
                );
                continue;
            }
            let mut pref = ConversionPreference::new(
                &snapshot.category,
                &snapshot.preferred_unit,
                snapshot.marine_region,
            );
            pref.preferred_format = snapshot.preferred_format;
            self.preferences.insert(snapshot.category, pref);
        }
        self.cache.clear();
    }

    // ========== Conversion facade ==========

    /// Convert between two units; failures are reported and yield `None`
    pub fn convert(&mut self, value: f64, from_id: &str, to_id: &str) -> Option<f64> {
        if !value.is_finite() {
            self.report(&ConversionError::InvalidValue);
            return None;
        }
        match self.cache.convert(&self.registry, value, from_id, to_id) {
            Ok(converted) => Some(converted),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Convert a native reading into its category's preferred unit
    pub fn convert_to_preferred(&mut self, value: Option<f64>, from_id: &str) -> Option<Converted> {
        let category = match self.registry.lookup(from_id) {
            Some(unit) => unit.category.clone(),
            None => {
                self.report(&ConversionError::unknown_unit(from_id));
                return None;
            }
        };
        self.convert_to_preferred_in(&category, value, from_id)
    }

    fn convert_to_preferred_in(
        &mut self,
        category: &str,
        value: Option<f64>,
        from_id: &str,
    ) -> Option<Converted> {
        let value = self.finite_or_report(value)?;
        let target = self.preferred_unit_id(category)?.to_string();
        match self
            .cache
            .convert_in(&self.registry, category, value, from_id, &target)
        {
            Ok(converted) => Some(Converted { value: converted, unit: target }),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    // ========== Formatting facade ==========

    /// Format a value already expressed in `unit_id`, e.g. `"10.6 kts"`
    pub fn format(&mut self, value: f64, unit_id: &str, options: &FormatOptions) -> String {
        self.format_in(None, value, unit_id, options)
    }

    fn format_in(
        &mut self,
        category: Option<&str>,
        value: f64,
        unit_id: &str,
        options: &FormatOptions,
    ) -> String {
        let Some(unit) = resolve_unit(&self.registry, category, unit_id) else {
            self.report(&ConversionError::unknown_unit(unit_id));
            return PLACEHOLDER.to_string();
        };
        if !value.is_finite() {
            let placeholder = join_symbol(PLACEHOLDER, &unit.symbol, options.hide_symbol);
            self.report(&ConversionError::InvalidValue);
            return placeholder;
        }
        let pref = self.preferences.get(&unit.category);
        let preferred_format = pref
            .filter(|p| p.preferred_unit == unit.id)
            .and_then(|p| p.preferred_format.as_deref());
        let resolved = resolve_format(
            unit,
            value,
            self.region,
            preferred_format,
            options.format_id.as_deref(),
        );
        let precision = options.precision.or(pref.and_then(|p| p.display_precision));
        let rounding = pref.map(|p| p.rounding_mode).unwrap_or_default();
        let rendered = render_strategy(&resolved.strategy, value, precision, rounding);
        join_symbol(&rendered, &unit.symbol, options.hide_symbol)
    }

    /// Convert into the preferred unit, then format
    pub fn format_with_preferred(
        &mut self,
        value: Option<f64>,
        from_id: &str,
        options: &FormatOptions,
    ) -> String {
        let category = match self.registry.lookup(from_id) {
            Some(unit) => unit.category.clone(),
            None => {
                self.report(&ConversionError::unknown_unit(from_id));
                return PLACEHOLDER.to_string();
            }
        };
        self.format_preferred_in(&category, value, from_id, options)
    }

    fn format_preferred_in(
        &mut self,
        category: &str,
        value: Option<f64>,
        from_id: &str,
        options: &FormatOptions,
    ) -> String {
        match self.convert_to_preferred_in(category, value, from_id) {
            Some(converted) => {
                let mut out = self.format_in(Some(category), converted.value, &converted.unit, options);
                let show_both = self
                    .preferences
                    .get(category)
                    .map(|p| p.show_both_units)
                    .unwrap_or(false);
                if show_both && from_id != converted.unit {
                    let original =
                        self.format_in(Some(category), value.unwrap_or(f64::NAN), from_id, options);
                    out = format!("{} ({})", out, original);
                }
                out
            }
            None => {
                let symbol = self.preferred_symbol(category).unwrap_or_default();
                join_symbol(PLACEHOLDER, &symbol, options.hide_symbol)
            }
        }
    }

    /// Convert a native reading for `category` and render it in one string
    pub fn convert_and_format(
        &mut self,
        value: Option<f64>,
        category: &str,
        from_id: Option<&str>,
    ) -> String {
        let from = from_id
            .map(str::to_string)
            .or_else(|| self.native_unit_id(category));
        let Some(from) = from else {
            self.report(&ConversionError::unknown_unit(category));
            return PLACEHOLDER.to_string();
        };
        self.format_preferred_in(category, value, &from, &FormatOptions::default())
    }

    /// Like [`PreferenceStore::convert_and_format`], but value and unit kept
    /// apart for layouts that style them separately
    pub fn get_formatted_value_with_unit(
        &mut self,
        value: Option<f64>,
        category: &str,
        from_id: Option<&str>,
    ) -> FormattedValue {
        let symbol = self.preferred_symbol(category).unwrap_or_default();

        let from = from_id
            .map(str::to_string)
            .or_else(|| self.native_unit_id(category));
        let Some(from) = from else {
            self.report(&ConversionError::unknown_unit(category));
            return FormattedValue { value: PLACEHOLDER.to_string(), unit: symbol };
        };

        let options = FormatOptions { hide_symbol: true, ..FormatOptions::default() };
        match self.convert_to_preferred_in(category, value, &from) {
            Some(converted) => FormattedValue {
                value: self.format_in(Some(category), converted.value, &converted.unit, &options),
                unit: symbol,
            },
            None => FormattedValue { value: PLACEHOLDER.to_string(), unit: symbol },
        }
    }

    /// Layout hints keeping a category's readout a stable width
    pub fn get_consistent_width(
        &self,
        category: &str,
        unit_symbol: Option<&str>,
        unit_id: Option<&str>,
    ) -> WidthHints {
        let symbol = unit_symbol.map(str::to_string).or_else(|| {
            unit_id
                .and_then(|id| self.registry.lookup_in(category, id))
                .map(|u| u.symbol.clone())
        });
        let symbol_width = symbol.as_deref().map(|s| s.chars().count() + 1).unwrap_or(0);

        match category_pattern(category) {
            Some(pattern) => WidthHints {
                min_width: pattern.len() + symbol_width,
                text_align: TextAlign::Right,
                letter_spacing: Some(0.5),
                format_pattern: Some(pattern.to_string()),
            },
            // Coordinates and other free-form categories get a wide field
            None => WidthHints {
                min_width: 12 + symbol_width,
                text_align: TextAlign::Right,
                letter_spacing: None,
                format_pattern: None,
            },
        }
    }

    /// Render a raw value against a category's layout pattern
    pub fn format_for_pattern(&self, value: f64, category: &str) -> Option<String> {
        category_pattern(category).map(|pattern| format_to_pattern(value, pattern))
    }

    // ========== Internals ==========

    fn preferred_unit_id(&self, category: &str) -> Option<&str> {
        self.preferences
            .get(category)
            .map(|p| p.preferred_unit.as_str())
            .or_else(|| self.registry.first_in_category(category).map(|u| u.id.as_str()))
    }

    fn preferred_symbol(&self, category: &str) -> Option<String> {
        self.preferred_unit_id(category)
            .and_then(|id| self.registry.lookup_in(category, id))
            .map(|u| u.symbol.clone())
    }

    /// The unit raw telemetry for this category arrives in: the category
    /// base (factor 1, no offset), or the first registered unit
    fn native_unit_id(&self, category: &str) -> Option<String> {
        let units = self.registry.units_in_category(category);
        units
            .iter()
            .find(|u| u.factor == 1.0 && u.offset == 0.0)
            .copied()
            .or_else(|| units.first().copied())
            .map(|u| u.id.clone())
    }

    fn ensure_preference(&mut self, category: &str, unit_id: &str) -> &mut ConversionPreference {
        let region = self.region;
        self.preferences
            .entry(category.to_string())
            .or_insert_with(|| ConversionPreference::new(category, unit_id, region))
    }

    fn finite_or_report(&mut self, value: Option<f64>) -> Option<f64> {
        match value {
            Some(v) if v.is_finite() => Some(v),
            _ => {
                self.report(&ConversionError::InvalidValue);
                None
            }
        }
    }

    fn report(&self, err: &ConversionError) {
        warn!(error = %err, "conversion failure");
        if let Some(handler) = &self.on_error {
            handler(err);
        }
    }
}

fn resolve_unit<'a>(
    registry: &'a UnitRegistry,
    category: Option<&str>,
    id: &str,
) -> Option<&'a UnitDefinition> {
    match category {
        Some(category) => registry.lookup_in(category, id).or_else(|| registry.lookup(id)),
        None => registry.lookup(id),
    }
}

/// Category -> preferred unit preset per measurement system
fn system_defaults(system: MeasurementSystem) -> &'static [(&'static str, &'static str)] {
    match system {
        MeasurementSystem::Metric => &[
            ("distance", "kilometer"),
            ("depth", "meter"),
            ("vessel_speed", "kmh_vessel"),
            ("wind_speed", "ms_wind"),
            ("temperature", "celsius"),
            ("pressure", "hpa"),
            ("angle", "degrees"),
            ("coordinates", "decimal_degrees"),
            ("voltage", "volt"),
            ("time_format", "time_24h"),
        ],
        MeasurementSystem::Imperial => &[
            ("distance", "mile"),
            ("depth", "feet"),
            ("vessel_speed", "mph_vessel"),
            ("wind_speed", "mph_wind"),
            ("temperature", "fahrenheit"),
            ("pressure", "inhg"),
            ("angle", "degrees"),
            ("coordinates", "decimal_degrees"),
            ("voltage", "volt"),
            ("time_format", "time_12h"),
        ],
        MeasurementSystem::Nautical => &[
            ("distance", "nautical_mile"),
            ("depth", "meter"),
            ("vessel_speed", "knots"),
            ("wind_speed", "knots_wind"),
            ("temperature", "celsius"),
            ("pressure", "hpa"),
            ("angle", "degrees"),
            ("coordinates", "decimal_degrees"),
            ("voltage", "volt"),
            ("time_format", "time_24h"),
        ],
    }
}

/// Region-conventional format id for a unit, falling back to its default
fn regional_format(unit: &UnitDefinition, region: MarineRegion) -> Option<String> {
    unit.region_defaults
        .get(&region)
        .cloned()
        .or_else(|| unit.default_format().map(|f| f.id.clone()))
}

/// Digit template keeping each category's readout jitter-free
fn category_pattern(category: &str) -> Option<&'static str> {
    match category {
        "distance" => Some("999.9"),
        "depth" => Some("999.9"),
        "vessel_speed" => Some("99.9"),
        "wind_speed" => Some("99.9"),
        "temperature" => Some("-99.9"),
        "pressure" => Some("9999"),
        "angle" => Some("999"),
        "voltage" => Some("99.9"),
        "time_format" => Some("99:99"),
        _ => None,
    }
}

fn join_symbol(rendered: &str, symbol: &str, hide_symbol: bool) -> String {
    if hide_symbol || symbol.is_empty() {
        rendered.to_string()
    } else {
        format!("{} {}", rendered, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn store() -> PreferenceStore {
        PreferenceStore::new(UnitRegistry::marine_catalog())
    }

    #[test]
    fn test_format_default_knots() {
        let mut store = store();
        assert_eq!(store.format(10.567, "knots", &FormatOptions::default()), "10.6 kts");
    }

    #[test]
    fn test_system_presets() {
        let mut store = store();
        store.set_system(MeasurementSystem::Nautical);
        assert_eq!(store.get_preferred_unit("vessel_speed"), Some("knots"));
        assert_eq!(store.get_preferred_unit("depth"), Some("meter"));

        store.set_system(MeasurementSystem::Imperial);
        assert_eq!(store.get_preferred_unit("vessel_speed"), Some("mph_vessel"));
        assert_eq!(store.get_preferred_unit("temperature"), Some("fahrenheit"));
    }

    #[test]
    fn test_convert_to_preferred() {
        let mut store = store();
        store.set_system(MeasurementSystem::Metric);

        // Vessel speed arrives in knots, preference is km/h
        let converted = store.convert_to_preferred(Some(10.0), "knots").unwrap();
        assert_eq!(converted.unit, "kmh_vessel");
        assert!((converted.value - 18.52).abs() < 0.01);

        assert!(store.convert_to_preferred(None, "knots").is_none());
        assert!(store.convert_to_preferred(Some(f64::NAN), "knots").is_none());
    }

    #[test]
    fn test_region_switch_reresolves_wind_format() {
        let mut store = store();
        store.set_system(MeasurementSystem::Nautical);

        store.set_marine_region(MarineRegion::Us);
        assert_eq!(
            store.get_preferred_format("wind_speed", "knots_wind"),
            Some("integer".to_string())
        );

        store.set_marine_region(MarineRegion::Eu);
        assert_eq!(
            store.get_preferred_format("wind_speed", "knots_wind"),
            Some("decimal".to_string())
        );
    }

    #[test]
    fn test_null_safety_voltage() {
        let mut store = store();
        let formatted = store.get_formatted_value_with_unit(None, "voltage", None);
        assert_eq!(formatted, FormattedValue { value: "---".to_string(), unit: "V".to_string() });
    }

    #[test]
    fn test_invalid_values_report_through_side_channel() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let mut store = PreferenceStore::new(UnitRegistry::marine_catalog())
            .with_error_handler(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        assert!(store.convert(f64::NAN, "knots", "kmh_vessel").is_none());
        assert!(store.convert(1.0, "knots", "celsius").is_none());
        assert!(store.convert(1.0, "cubits", "knots").is_none());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_convert_and_format_native_unit() {
        let mut store = store();
        store.set_system(MeasurementSystem::Nautical);

        // Depth telemetry is native meters; the nautical preset displays
        // meters, so this exercises the depth-scoped duplicate "meter" id
        assert_eq!(store.convert_and_format(Some(12.34), "depth", None), "12.3 m");

        store.set_preferred_unit("depth", "feet").unwrap();
        assert_eq!(store.convert_and_format(Some(10.0), "depth", None), "33 ft");
    }

    #[test]
    fn test_formatted_value_with_unit_split() {
        let mut store = store();
        store.set_system(MeasurementSystem::Nautical);

        let formatted = store.get_formatted_value_with_unit(Some(7.83), "wind_speed", None);
        assert_eq!(formatted.value, "7.8");
        assert_eq!(formatted.unit, "kts");
    }

    #[test]
    fn test_display_precision_override() {
        let mut store = store();
        store.set_system(MeasurementSystem::Nautical);
        store.set_display_precision("vessel_speed", Some(2));

        assert_eq!(store.format(10.567, "knots", &FormatOptions::default()), "10.57 kts");
    }

    #[test]
    fn test_show_both_units() {
        let mut store = store();
        store.set_system(MeasurementSystem::Metric);
        store.set_show_both_units("vessel_speed", true);

        let out = store.format_with_preferred(Some(10.0), "knots", &FormatOptions::default());
        assert_eq!(out, "18.5 km/h (10.0 kts)");
    }

    #[test]
    fn test_unknown_unit_degrades_to_placeholder() {
        let mut store = store();
        assert_eq!(store.format(5.0, "cubits", &FormatOptions::default()), "---");
        assert_eq!(
            store.format_with_preferred(Some(5.0), "cubits", &FormatOptions::default()),
            "---"
        );
    }

    #[test]
    fn test_preferred_unit_falls_back_to_first_in_category() {
        let store = store();
        // No preference stored yet; the documented best-effort fallback is
        // the first unit registered in the category, nautical_mile.
        assert_eq!(store.get_preferred_unit("distance"), Some("nautical_mile"));
    }

    #[test]
    fn test_reset() {
        let mut store = store();
        store.set_system(MeasurementSystem::Imperial);
        store.set_marine_region(MarineRegion::Us);
        store.reset_preferences();

        assert_eq!(store.marine_region(), MarineRegion::International);
        assert_eq!(store.get_preferred_unit("depth"), Some("meter"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = store();
        store.set_system(MeasurementSystem::Nautical);
        store.set_marine_region(MarineRegion::Us);

        let snapshots = store.export_preferences();
        let json = serde_json::to_string(&snapshots).unwrap();
        let restored: Vec<PreferenceSnapshot> = serde_json::from_str(&json).unwrap();

        let mut other = PreferenceStore::new(UnitRegistry::marine_catalog());
        other.import_preferences(restored);

        assert_eq!(other.marine_region(), MarineRegion::Us);
        assert_eq!(other.get_preferred_unit("vessel_speed"), Some("knots"));
        assert_eq!(
            other.get_preferred_format("wind_speed", "knots_wind"),
            Some("integer".to_string())
        );
        assert_eq!(other.export_preferences(), store.export_preferences());
    }

    #[test]
    fn test_import_skips_unknown_units() {
        let mut store = store();
        store.import_preferences(vec![PreferenceSnapshot {
            category: "depth".to_string(),
            preferred_unit: "leagues".to_string(),
            preferred_format: None,
            marine_region: MarineRegion::Uk,
        }]);
        // Region follows the records, the bad record itself is dropped
        assert_eq!(store.marine_region(), MarineRegion::Uk);
        assert_eq!(store.get_preferred_unit("depth"), Some("meter"));
    }

    #[test]
    fn test_consistent_width_hints() {
        let store = store();

        let hints = store.get_consistent_width("depth", Some("m"), None);
        assert_eq!(hints.format_pattern.as_deref(), Some("999.9"));
        assert_eq!(hints.min_width, 7); // "999.9" plus " m"
        assert_eq!(hints.text_align, TextAlign::Right);

        let hints = store.get_consistent_width("coordinates", None, None);
        assert_eq!(hints.format_pattern, None);
        assert_eq!(hints.min_width, 12);
    }

    #[test]
    fn test_format_for_pattern() {
        let store = store();
        assert_eq!(store.format_for_pattern(7.0, "angle").unwrap(), "  7");
        assert_eq!(store.format_for_pattern(-5.26, "temperature").unwrap(), "-5.3");
    }
}
