//! # Analytic solar position
//!
//! Low-order solar series (mean longitude, mean anomaly, equation of center, mean obliquity),
//! accurate to about a hundredth of a degree over a few centuries around J2000. No network
//! access is needed for the Sun.
//!
//! ```text
//! instant ──(solar day)──► JD ──► T (Julian centuries) ──► L, M, e, C ──► λ, ε ──► (α, δ)
//! ```
//!
//! The Julian date is built from the **solar** day length. The sidereal clock uses a different
//! day; mixing the two shifts the Sun by about a degree per year.
use crate::constants::{Degree, UnixSeconds, DAYS_PER_JULIAN_CENTURY, JD_J2000, RADEG};
use crate::ref_system::{to_direction, Direction};
use crate::skyframe_errors::SkyframeError;
use crate::time::instant_to_julian_date;

/// Intermediate quantities of the solar series, all angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTerms {
    /// Julian centuries since J2000.0
    pub t: f64,
    pub mean_longitude: Degree,
    pub mean_anomaly: Degree,
    pub eccentricity: f64,
    pub equation_of_center: Degree,
    pub true_longitude: Degree,
    pub obliquity: Degree,
}

impl SolarTerms {
    pub fn at(instant: UnixSeconds) -> Self {
        let jd = instant_to_julian_date(instant);
        let t = (jd - JD_J2000) / DAYS_PER_JULIAN_CENTURY;

        let mean_longitude = (280.46646 + 36_000.76983 * t + 0.0003032 * t * t).rem_euclid(360.0);
        let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.0001537 * t * t).rem_euclid(360.0);
        let eccentricity = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

        let m = mean_anomaly * RADEG;
        let equation_of_center = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
            + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
            + 0.000289 * (3.0 * m).sin();

        SolarTerms {
            t,
            mean_longitude,
            mean_anomaly,
            eccentricity,
            equation_of_center,
            true_longitude: mean_longitude + equation_of_center,
            obliquity: 23.439292 - 0.00013 * t,
        }
    }

    /// Apparent equatorial coordinates `(ra, dec)` in degrees, RA in `[0, 360)`.
    pub fn radec(&self) -> (Degree, Degree) {
        let lambda = self.true_longitude * RADEG;
        let eps = self.obliquity * RADEG;

        let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos()) / RADEG;
        let dec = (eps.sin() * lambda.sin()).asin() / RADEG;
        (ra.rem_euclid(360.0), dec)
    }
}

/// Apparent `(ra, dec)` of the Sun in degrees at `instant`.
pub fn sun_radec(instant: UnixSeconds) -> (Degree, Degree) {
    SolarTerms::at(instant).radec()
}

/// Direction of the Sun in the fixed equatorial frame at `instant`.
///
/// Return
/// ------
/// * The Sun [`Direction`], or [`SkyframeError::InvalidAngle`] if the instant is not finite.
pub fn sun_direction(instant: UnixSeconds) -> Result<Direction, SkyframeError> {
    if !instant.is_finite() {
        return Err(SkyframeError::InvalidAngle(format!(
            "cannot compute the Sun position for instant {instant}"
        )));
    }
    let (ra, dec) = sun_radec(instant);
    to_direction(ra, dec)
}

#[cfg(test)]
mod solar_ephemeris_test {
    use super::*;
    use crate::constants::J2000_UNIX_SECONDS;
    use crate::time::parse_instant;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_terms_at_j2000() {
        let terms = SolarTerms::at(J2000_UNIX_SECONDS);
        assert_eq!(terms.t, 0.0);
        assert_abs_diff_eq!(terms.mean_longitude, 280.46646, epsilon = 1e-9);
        assert_abs_diff_eq!(terms.mean_anomaly, 357.52911, epsilon = 1e-9);
        assert_abs_diff_eq!(terms.obliquity, 23.439292, epsilon = 1e-12);
    }

    #[test]
    fn test_j2000_position() {
        let (ra, dec) = sun_radec(J2000_UNIX_SECONDS);
        assert_abs_diff_eq!(ra, 281.2928822897, epsilon = 1e-6);
        assert_abs_diff_eq!(dec, -23.0332104950, epsilon = 1e-6);
    }

    #[test]
    fn test_march_equinox_2024() {
        let t = parse_instant("2024-03-20T03:06:00").unwrap();
        let (ra, dec) = sun_radec(t);
        assert!(dec.abs() < 0.3, "declination at equinox: {dec}");
        assert!(ra < 0.3 || ra > 359.7, "right ascension at equinox: {ra}");
    }

    #[test]
    fn test_solstices_2024() {
        let june = parse_instant("2024-06-20T20:51:00").unwrap();
        let (ra, dec) = sun_radec(june);
        assert_abs_diff_eq!(dec, 23.44, epsilon = 0.05);
        assert_abs_diff_eq!(ra, 90.0, epsilon = 0.1);

        let december = parse_instant("2024-12-21T09:20:00").unwrap();
        let (ra, dec) = sun_radec(december);
        assert_abs_diff_eq!(dec, -23.44, epsilon = 0.05);
        assert_abs_diff_eq!(ra, 270.0, epsilon = 0.1);
    }

    #[test]
    fn test_sun_direction() {
        let t = parse_instant("2024-06-20T20:51:00").unwrap();
        let d = sun_direction(t).unwrap();
        let (_, dec) = d.to_radec();
        assert_abs_diff_eq!(dec, 23.44, epsilon = 0.05);
        assert!(sun_direction(f64::NAN).is_err());
    }
}
