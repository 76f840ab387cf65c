use std::sync::LazyLock;

use regex::Regex;

use super::ObserverLocation;
use crate::skyframe_errors::SkyframeError;

static CITY_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"LAT(-?\d+\.\d+)LNG(-?\d+\.\d+)").expect("city value regex is valid")
});

/// Keep two decimals, rounding toward negative infinity.
fn floor_two_decimals(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Parse a city picker entry such as `"LAT39.3051LNG-76.6144"`.
///
/// Both coordinates are floored to two decimals before validation, so the example above gives
/// `(39.30, -76.62)`.
///
/// Return
/// ------
/// * The observer location, [`SkyframeError::Format`] when the pattern is absent, or
///   [`SkyframeError::OutOfRange`] for coordinates outside the observer domain.
pub fn parse_city_value(value: &str) -> Result<ObserverLocation, SkyframeError> {
    let caps = CITY_VALUE_REGEX.captures(value).ok_or_else(|| {
        SkyframeError::Format(format!(
            "{value:?} is not a city entry, expected 'LAT<lat>LNG<long>'"
        ))
    })?;

    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| SkyframeError::Format(format!("invalid coordinate {s:?} in {value:?}")))
    };
    let latitude = floor_two_decimals(parse(&caps[1])?);
    let longitude = floor_two_decimals(parse(&caps[2])?);

    ObserverLocation::new(latitude, longitude)
}
