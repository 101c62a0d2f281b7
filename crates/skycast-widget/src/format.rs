//! Display formatting for weather values.
//!
//! Missing measurements render as "n/a", with two exceptions from the
//! backend contract: absent precipitation amounts and probabilities
//! count as zero, and an unknown wind direction renders as nothing.

use chrono::{NaiveDate, NaiveDateTime};
use skycast_api::{Coordinate, Unit};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Unit-dependent display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitLabels {
    pub temperature: &'static str,
    pub speed: &'static str,
    pub precipitation: &'static str,
}

pub fn unit_labels(unit: Unit) -> UnitLabels {
    match unit {
        Unit::Fahrenheit => UnitLabels {
            temperature: "°F",
            speed: "mph",
            precipitation: "in",
        },
        Unit::Celsius => UnitLabels {
            temperature: "°C",
            speed: "km/h",
            precipitation: "mm",
        },
    }
}

/// Convert wind direction degrees to one of sixteen compass points.
pub fn compass_point(degrees: Option<f64>) -> &'static str {
    let Some(degrees) = degrees else {
        return "";
    };
    if !degrees.is_finite() {
        return "";
    }
    let index = ((degrees / 22.5) + 0.5).floor() as i64;
    COMPASS_POINTS[index.rem_euclid(16) as usize]
}

pub fn fmt_temperature(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) => format!("{}{}", v.round() as i64, unit_labels(unit).temperature),
        None => "n/a".to_string(),
    }
}

pub fn fmt_speed(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) => format!("{} {}", v.round() as i64, unit_labels(unit).speed),
        None => "n/a".to_string(),
    }
}

/// Precipitation amount, unrounded. The backend omits the field when
/// upstream has no reading, which displays as zero.
pub fn fmt_precipitation(value: Option<f64>, unit: Unit) -> String {
    format!(
        "{} {}",
        value.unwrap_or(0.0),
        unit_labels(unit).precipitation
    )
}

/// Precipitation probability; missing counts as zero.
pub fn fmt_probability(value: Option<f64>) -> String {
    format!("{}%", value.unwrap_or(0.0).round() as i64)
}

pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", v.round() as i64),
        None => "n/a".to_string(),
    }
}

pub fn fmt_pressure(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} hPa", v.round() as i64),
        None => "n/a".to_string(),
    }
}

/// Coordinate to four decimal places, the precision the backend echoes.
pub fn fmt_coordinate(coordinate: Coordinate) -> String {
    format!("{:.4}, {:.4}", coordinate.latitude, coordinate.longitude)
}

/// "2025-08-02" renders as "Sat, Aug 2"; unparseable input passes
/// through untouched.
pub fn fmt_forecast_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%a, %b %-d").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// "2025-08-01T14:30" renders as "Fri, Aug 1, 2:30 PM"; unparseable
/// input passes through untouched.
pub fn fmt_timestamp(iso: &str) -> String {
    let parsed = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S"));
    match parsed {
        Ok(stamp) => stamp.format("%a, %b %-d, %-I:%M %p").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Saved-request date span, e.g. "Aug 1, 2025 to Aug 5, 2025".
pub fn fmt_date_range(start: &str, end: &str) -> String {
    let pretty = |iso: &str| match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => iso.to_string(),
    };
    format!("{} to {}", pretty(start), pretty(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_cardinal_points() {
        assert_eq!(compass_point(Some(0.0)), "N");
        assert_eq!(compass_point(Some(90.0)), "E");
        assert_eq!(compass_point(Some(180.0)), "S");
        assert_eq!(compass_point(Some(270.0)), "W");
    }

    #[test]
    fn test_compass_wraps_at_north() {
        assert_eq!(compass_point(Some(360.0)), "N");
        assert_eq!(compass_point(Some(348.75)), "N");
        assert_eq!(compass_point(Some(348.74)), "NNW");
    }

    #[test]
    fn test_compass_intermediate_point() {
        assert_eq!(compass_point(Some(230.0)), "SW");
    }

    #[test]
    fn test_compass_missing_is_empty() {
        assert_eq!(compass_point(None), "");
        assert_eq!(compass_point(Some(f64::NAN)), "");
    }

    #[test]
    fn test_temperature_rounds_half_up() {
        assert_eq!(fmt_temperature(Some(71.5), Unit::Fahrenheit), "72°F");
        assert_eq!(fmt_temperature(Some(20.4), Unit::Celsius), "20°C");
        assert_eq!(fmt_temperature(None, Unit::Fahrenheit), "n/a");
    }

    #[test]
    fn test_speed_labels_follow_unit() {
        assert_eq!(fmt_speed(Some(8.4), Unit::Fahrenheit), "8 mph");
        assert_eq!(fmt_speed(Some(13.7), Unit::Celsius), "14 km/h");
    }

    #[test]
    fn test_precipitation_missing_counts_as_zero() {
        assert_eq!(fmt_precipitation(None, Unit::Fahrenheit), "0 in");
        assert_eq!(fmt_precipitation(Some(0.12), Unit::Fahrenheit), "0.12 in");
        assert_eq!(fmt_precipitation(Some(3.0), Unit::Celsius), "3 mm");
    }

    #[test]
    fn test_probability_missing_counts_as_zero() {
        assert_eq!(fmt_probability(None), "0%");
        assert_eq!(fmt_probability(Some(35.0)), "35%");
    }

    #[test]
    fn test_percent_and_pressure_fallbacks() {
        assert_eq!(fmt_percent(Some(55.0)), "55%");
        assert_eq!(fmt_percent(None), "n/a");
        assert_eq!(fmt_pressure(Some(1015.2)), "1015 hPa");
        assert_eq!(fmt_pressure(None), "n/a");
    }

    #[test]
    fn test_coordinate_four_decimals() {
        let c = Coordinate::new(48.8566, 2.3522);
        assert_eq!(fmt_coordinate(c), "48.8566, 2.3522");
        assert_eq!(fmt_coordinate(Coordinate::new(51.5, -0.12)), "51.5000, -0.1200");
    }

    #[test]
    fn test_forecast_date_formatting() {
        assert_eq!(fmt_forecast_date("2025-08-02"), "Sat, Aug 2");
        assert_eq!(fmt_forecast_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_timestamp_formatting() {
        assert_eq!(fmt_timestamp("2025-08-01T14:30"), "Fri, Aug 1, 2:30 PM");
        assert_eq!(fmt_timestamp("2025-08-01T09:05:00"), "Fri, Aug 1, 9:05 AM");
        assert_eq!(fmt_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_date_range_formatting() {
        assert_eq!(
            fmt_date_range("2025-08-01", "2025-08-05"),
            "Aug 1, 2025 to Aug 5, 2025"
        );
        assert_eq!(fmt_date_range("???", "2025-08-05"), "??? to Aug 5, 2025");
    }
}
