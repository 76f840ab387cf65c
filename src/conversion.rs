//! Angle parsing for the two upstream sources of sky coordinates.
//!
//! The star catalog and the Horizons ephemeris service encode angles differently and the two
//! paths are kept apart on purpose:
//!
//! * catalog strings carry a **sign glyph** in front of the declination degrees
//!   (`"+42° 05′ 32″"`), and right ascension with unit letters (`"00h 04m 36.7s"`);
//! * ephemeris rows are whitespace separated numbers where the declination sign is the
//!   **numeric sign** of the degree token (`"-00 05 08.9"`).
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{Degree, DEG_PER_HOUR, MAX_LATITUDE};
use crate::skyframe_errors::SkyframeError;

static CATALOG_RA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)h (\d+)m ([\d.]+)s$").expect("catalog RA regex is valid")
});

static CATALOG_DEC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?\d+)° (\d+)′ ([\d.]+)″$").expect("catalog Dec regex is valid")
});

fn parse_field(field: &str, source: &str) -> Result<f64, SkyframeError> {
    field
        .parse::<f64>()
        .map_err(|_| SkyframeError::Format(format!("invalid numeric field {field:?} in {source:?}")))
}

/// Check minute/second fields of a sexagesimal angle.
fn check_sexagesimal(minutes: f64, seconds: f64, source: &str) -> Result<(), SkyframeError> {
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(SkyframeError::Format(format!(
            "minutes and seconds must be below 60 in {source:?}"
        )));
    }
    Ok(())
}

/// Parse a catalog right ascension string to degrees.
///
/// Arguments
/// ---------
/// * `text`: right ascension in the format `"<int>h <int>m <float>s"`, e.g. `"00h 04m 36.7s"`
///
/// Return
/// ------
/// * Right ascension in degrees, in `[0, 360)`.
/// * [`SkyframeError::Format`] if the pattern does not match or a field is out of range.
pub fn parse_catalog_ra(text: &str) -> Result<Degree, SkyframeError> {
    let caps = CATALOG_RA_REGEX
        .captures(text.trim())
        .ok_or_else(|| {
            SkyframeError::Format(format!(
                "{text:?} is not a catalog RA, expected '00h 04m 36.7s'"
            ))
        })?;

    let hours = parse_field(&caps[1], text)?;
    let minutes = parse_field(&caps[2], text)?;
    let seconds = parse_field(&caps[3], text)?;

    if hours >= 24.0 {
        return Err(SkyframeError::Format(format!(
            "hours must be below 24 in {text:?}"
        )));
    }
    check_sexagesimal(minutes, seconds, text)?;

    Ok((hours + minutes / 60.0 + seconds / 3600.0) * DEG_PER_HOUR)
}

/// Parse a catalog declination string to degrees.
///
/// The sign is read from the leading glyph of the degree token, so `"-00° 30′ 00″"` is
/// negative even though its degree value is zero. A missing glyph or `+` means positive.
///
/// Arguments
/// ---------
/// * `text`: declination in the format `"<±int>° <int>′ <float>″"`, e.g. `"+42° 05′ 32″"`
///
/// Return
/// ------
/// * Declination in degrees, in `[-90, 90]`.
/// * [`SkyframeError::Format`] if the pattern does not match or the value leaves the domain.
pub fn parse_catalog_dec(text: &str) -> Result<Degree, SkyframeError> {
    let caps = CATALOG_DEC_REGEX
        .captures(text.trim())
        .ok_or_else(|| {
            SkyframeError::Format(format!(
                "{text:?} is not a catalog Dec, expected '+42° 05′ 32″'"
            ))
        })?;

    let degree_token = &caps[1];
    let sign = if degree_token.starts_with('-') { -1.0 } else { 1.0 };
    let degrees = parse_field(degree_token.trim_start_matches(['-', '+']), text)?;
    let minutes = parse_field(&caps[2], text)?;
    let seconds = parse_field(&caps[3], text)?;
    check_sexagesimal(minutes, seconds, text)?;

    let dec = sign * (degrees + minutes / 60.0 + seconds / 3600.0);
    if dec.abs() > MAX_LATITUDE {
        return Err(SkyframeError::Format(format!(
            "declination {dec} outside [-90, 90] in {text:?}"
        )));
    }
    Ok(dec)
}

/// Rebuild a signed angle from its degree/minute/second parts.
///
/// `sign` is applied to the magnitude `|degree_part| + minute_part/60 + second_part/3600`;
/// any negative `sign` yields a negative angle.
pub fn parse_ephemeris_angle(
    sign: f64,
    degree_part: f64,
    minute_part: f64,
    second_part: f64,
) -> Degree {
    let magnitude = degree_part.abs() + minute_part / 60.0 + second_part / 3600.0;
    if sign.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

fn parse_ephemeris_token(token: &str) -> Result<f64, SkyframeError> {
    token
        .parse::<f64>()
        .map_err(|_| SkyframeError::EphemerisFormat(format!("non-numeric ephemeris field {token:?}")))
}

/// Right ascension from an ephemeris `h m s` triplet, in degrees.
pub fn ephemeris_ra(hours: &str, minutes: &str, seconds: &str) -> Result<Degree, SkyframeError> {
    let h = parse_ephemeris_token(hours)?;
    let m = parse_ephemeris_token(minutes)?;
    let s = parse_ephemeris_token(seconds)?;
    if !(0.0..24.0).contains(&h) || !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&s) {
        return Err(SkyframeError::EphemerisFormat(format!(
            "RA triplet out of range: {hours} {minutes} {seconds}"
        )));
    }
    Ok(parse_ephemeris_angle(1.0, h, m, s) * DEG_PER_HOUR)
}

/// Declination from an ephemeris `d m s` triplet, in degrees.
///
/// The sign is the numeric sign of the degree token. The token is read as a float so that a
/// negative zero (`"-00"`) keeps its sign.
pub fn ephemeris_dec(degrees: &str, minutes: &str, seconds: &str) -> Result<Degree, SkyframeError> {
    let d = parse_ephemeris_token(degrees)?;
    let m = parse_ephemeris_token(minutes)?;
    let s = parse_ephemeris_token(seconds)?;
    let dec = parse_ephemeris_angle(d, d, m, s);
    if dec.abs() > MAX_LATITUDE {
        return Err(SkyframeError::EphemerisFormat(format!(
            "declination {dec} outside [-90, 90]: {degrees} {minutes} {seconds}"
        )));
    }
    Ok(dec)
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_catalog_ra() {
        assert_abs_diff_eq!(
            parse_catalog_ra("00h 04m 36.7s").unwrap(),
            1.1529166666666668,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            parse_catalog_ra("22h 52m 23.37s").unwrap(),
            343.097375,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            parse_catalog_ra("23h 59m 59.99s").unwrap(),
            359.999958333,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_catalog_ra_rejects() {
        for bad in [
            "",
            "00h 04m",
            "00 04 36.7",
            "-01h 04m 36.7s",
            "00h 04m 36.7.2s",
            "24h 00m 00s",
            "12h 60m 00s",
        ] {
            assert!(
                matches!(parse_catalog_ra(bad), Err(SkyframeError::Format(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_catalog_dec() {
        assert_abs_diff_eq!(
            parse_catalog_dec("+42° 05′ 32″").unwrap(),
            42.09222222222222,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            parse_catalog_dec("42° 05′ 32″").unwrap(),
            42.09222222222222,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            parse_catalog_dec("-14° 47′ 05.4″").unwrap(),
            -14.784833333333333,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_catalog_dec_negative_zero_degrees() {
        assert_abs_diff_eq!(
            parse_catalog_dec("-00° 30′ 00″").unwrap(),
            -0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_catalog_dec_rejects() {
        for bad in ["+42 05 32", "+42° 05′", "+91° 00′ 00″", "+42° 61′ 00″", "abc"] {
            assert!(
                matches!(parse_catalog_dec(bad), Err(SkyframeError::Format(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ephemeris_angle() {
        assert_eq!(parse_ephemeris_angle(1.0, 10.0, 30.0, 0.0), 10.5);
        assert_eq!(parse_ephemeris_angle(-1.0, 10.0, 30.0, 0.0), -10.5);
        assert_eq!(parse_ephemeris_angle(-10.0, -10.0, 30.0, 0.0), -10.5);
    }

    #[test]
    fn test_ephemeris_dec_sign_from_number() {
        assert_abs_diff_eq!(
            ephemeris_dec("-00", "05", "08.9").unwrap(),
            -(5.0 / 60.0 + 8.9 / 3600.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            ephemeris_dec("+13", "55", "42.7").unwrap(),
            13.928527777777777,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            ephemeris_dec("-14", "47", "05.4").unwrap(),
            -14.784833333333333,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ephemeris_ra() {
        assert_abs_diff_eq!(
            ephemeris_ra("23", "59", "11.29").unwrap(),
            359.7970416666667,
            epsilon = 1e-9
        );
        assert!(matches!(
            ephemeris_ra("n.a.", "59", "11.29"),
            Err(SkyframeError::EphemerisFormat(_))
        ));
        assert!(matches!(
            ephemeris_ra("25", "00", "00"),
            Err(SkyframeError::EphemerisFormat(_))
        ));
    }
}
