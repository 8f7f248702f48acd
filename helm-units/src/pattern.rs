//! Fixed-width numeric rendering
//!
//! Instrument screens redraw several times a second; digits that wander
//! horizontally between frames are distracting, so every numeric readout is
//! rendered against a digit-template pattern (`"999.9"`, `"-99.9"`, `"999"`)
//! and stays a stable width. This module knows nothing about units or the
//! registry.

use crate::unit::FormatStrategy;
use helm_core::RoundingMode;

/// Render a number against a literal width/precision template
///
/// Without a `.` the pattern is an integer template: the value is rounded
/// and right-aligned to the pattern's digit width. With a `.` the decimal
/// digit count is taken from the characters after it and the integer portion
/// is right-aligned to the digit width before it. A negative sign shares the
/// digit field, so `format_to_pattern(-5.26, "-99.9")` is exactly `"-5.3"`;
/// the literal `-` in a pattern only widens layout hints, not the string.
pub fn format_to_pattern(value: f64, pattern: &str) -> String {
    match pattern.find('.') {
        None => {
            let width = digit_width(pattern);
            let rounded = value.round() as i64;
            format!("{:>width$}", rounded, width = width)
        }
        Some(dot) => {
            let int_width = digit_width(&pattern[..dot]);
            let decimals = digit_width(&pattern[dot + 1..]);
            let fixed = format!("{:.*}", decimals, value);
            match fixed.split_once('.') {
                Some((int_part, frac_part)) => {
                    format!("{:>width$}.{}", int_part, frac_part, width = int_width)
                }
                // decimals == 0 despite the dot, e.g. pattern "999."
                None => format!("{:>width$}", fixed, width = int_width),
            }
        }
    }
}

fn digit_width(segment: &str) -> usize {
    segment.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Render a value with a formatting strategy
///
/// `precision` overrides the decimal count of decimal-style strategies;
/// `rounding` applies to integer-style ones.
pub fn render_strategy(
    strategy: &FormatStrategy,
    value: f64,
    precision: Option<u8>,
    rounding: RoundingMode,
) -> String {
    match strategy {
        FormatStrategy::IntegerRounding => {
            format!("{}", rounding.apply(value) as i64)
        }
        FormatStrategy::FixedDecimal { decimals } => {
            let decimals = precision.unwrap_or(*decimals) as usize;
            format!("{:.*}", decimals, value)
        }
        FormatStrategy::Pattern { template } => format_to_pattern(value, template),
        FormatStrategy::AffineFormula { scale, offset, decimals } => {
            format!("{:.*}", *decimals as usize, value * scale + offset)
        }
        FormatStrategy::BandedLookup { thresholds } => {
            let band = thresholds.iter().take_while(|&&t| value >= t).count();
            format!("{}", band)
        }
        FormatStrategy::DegreesMinutes { seconds } => render_degrees_minutes(value, *seconds),
        FormatStrategy::ClockTime { twelve_hour } => render_clock(value, *twelve_hour),
    }
}

fn render_degrees_minutes(value: f64, seconds: bool) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let degrees = magnitude.trunc();
    let minutes_total = (magnitude - degrees) * 60.0;

    if seconds {
        let minutes = minutes_total.trunc();
        let secs = (minutes_total - minutes) * 60.0;
        format!("{}{}° {}' {:.1}\"", sign, degrees as i64, minutes as i64, secs)
    } else {
        format!("{}{}° {:.3}'", sign, degrees as i64, minutes_total)
    }
}

fn render_clock(decimal_hours: f64, twelve_hour: bool) -> String {
    let wrapped = decimal_hours.rem_euclid(24.0);
    let mut hours = wrapped.trunc() as i64;
    let mut minutes = ((wrapped - wrapped.trunc()) * 60.0).round() as i64;
    if minutes == 60 {
        minutes = 0;
        hours = (hours + 1) % 24;
    }

    if twelve_hour {
        let suffix = if hours < 12 { "am" } else { "pm" };
        let display = match hours % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display, minutes, suffix)
    } else {
        format!("{:02}:{:02}", hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_pattern_right_aligned() {
        assert_eq!(format_to_pattern(7.0, "999"), "  7");
        assert_eq!(format_to_pattern(123.0, "999"), "123");
        assert_eq!(format_to_pattern(7.6, "999"), "  8");
    }

    #[test]
    fn test_decimal_pattern_alignment() {
        assert_eq!(format_to_pattern(-5.26, "-99.9"), "-5.3");
        assert_eq!(format_to_pattern(5.26, "-99.9"), " 5.3");
        assert_eq!(format_to_pattern(12.345, "999.9"), " 12.3");
        assert_eq!(format_to_pattern(3.0, "99.99"), " 3.00");
    }

    #[test]
    fn test_pattern_never_changes_value() {
        // Overflowing the template widens the field instead of truncating
        assert_eq!(format_to_pattern(12345.0, "999"), "12345");
        assert_eq!(format_to_pattern(1234.5, "99.9"), "1234.5");
    }

    #[test]
    fn test_render_fixed_decimal_with_override() {
        let strategy = FormatStrategy::FixedDecimal { decimals: 1 };
        assert_eq!(render_strategy(&strategy, 10.567, None, RoundingMode::Nearest), "10.6");
        assert_eq!(render_strategy(&strategy, 10.567, Some(2), RoundingMode::Nearest), "10.57");
    }

    #[test]
    fn test_render_integer_rounding_modes() {
        let strategy = FormatStrategy::IntegerRounding;
        assert_eq!(render_strategy(&strategy, 9.5, None, RoundingMode::Nearest), "10");
        assert_eq!(render_strategy(&strategy, 9.5, None, RoundingMode::Floor), "9");
        assert_eq!(render_strategy(&strategy, 9.1, None, RoundingMode::Ceiling), "10");
    }

    #[test]
    fn test_render_affine_formula() {
        let strategy = FormatStrategy::AffineFormula { scale: 1.8, offset: 32.0, decimals: 1 };
        assert_eq!(render_strategy(&strategy, 100.0, None, RoundingMode::Nearest), "212.0");
    }

    #[test]
    fn test_render_banded_lookup() {
        let strategy = FormatStrategy::BandedLookup { thresholds: vec![1.0, 4.0, 7.0] };
        assert_eq!(render_strategy(&strategy, 0.5, None, RoundingMode::Nearest), "0");
        assert_eq!(render_strategy(&strategy, 5.0, None, RoundingMode::Nearest), "2");
        assert_eq!(render_strategy(&strategy, 9.0, None, RoundingMode::Nearest), "3");
    }

    #[test]
    fn test_render_degrees_minutes() {
        let ddm = FormatStrategy::DegreesMinutes { seconds: false };
        assert_eq!(render_strategy(&ddm, 47.4354, None, RoundingMode::Nearest), "47° 26.124'");
        assert_eq!(render_strategy(&ddm, -9.5, None, RoundingMode::Nearest), "-9° 30.000'");

        let dms = FormatStrategy::DegreesMinutes { seconds: true };
        assert_eq!(render_strategy(&dms, 47.5, None, RoundingMode::Nearest), "47° 30' 0.0\"");
    }

    #[test]
    fn test_render_clock() {
        let h24 = FormatStrategy::ClockTime { twelve_hour: false };
        assert_eq!(render_strategy(&h24, 14.5, None, RoundingMode::Nearest), "14:30");
        assert_eq!(render_strategy(&h24, 0.25, None, RoundingMode::Nearest), "00:15");
        // Minute rounding carries into the hour
        assert_eq!(render_strategy(&h24, 9.9999, None, RoundingMode::Nearest), "10:00");

        let h12 = FormatStrategy::ClockTime { twelve_hour: true };
        assert_eq!(render_strategy(&h12, 14.5, None, RoundingMode::Nearest), "2:30 pm");
        assert_eq!(render_strategy(&h12, 0.5, None, RoundingMode::Nearest), "12:30 am");
    }
}
