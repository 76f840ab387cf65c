use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::{
    JulianDate, Radian, UnixSeconds, DPI, JD_J2000, J2000_UNIX_SECONDS, SECONDS_PER_DAY,
    SIDEREAL_DAY_SECONDS, SIDEREAL_EPOCH_UNIX,
};
use crate::skyframe_errors::SkyframeError;

/// Sidereal rotation angle of the sky for a given instant.
///
/// The elapsed time since [`SIDEREAL_EPOCH_UNIX`] is reduced modulo the sidereal day with a
/// Euclidean (non-negative) remainder, so the angle stays continuous across the epoch.
///
/// Argument
/// --------
/// * `instant`: seconds since 1970-01-01T00:00:00Z
///
/// Return
/// ------
/// * The angle in radians, in `(-2π, 0]`.
pub fn sidereal_angle(instant: UnixSeconds) -> Radian {
    let fraction =
        (instant - SIDEREAL_EPOCH_UNIX).rem_euclid(SIDEREAL_DAY_SECONDS) / SIDEREAL_DAY_SECONDS;
    -fraction * DPI
}

/// Julian date of an instant.
///
/// Uses the solar day ([`SECONDS_PER_DAY`]), never the sidereal day.
pub fn instant_to_julian_date(instant: UnixSeconds) -> JulianDate {
    JD_J2000 + (instant - J2000_UNIX_SECONDS) / SECONDS_PER_DAY
}

/// Transformation from a date string to an instant.
///
/// Argument
/// --------
/// * `date`: a date in the format YYYY-MM-ddTHH:mm:ss, read as UTC unless a time scale
///   suffix is given (e.g. `"2024-03-20T03:06:00 UTC"`)
///
/// Return
/// ------
/// * Seconds since 1970-01-01T00:00:00Z, or [`SkyframeError::Format`] if the date is invalid.
pub fn parse_instant(date: &str) -> Result<UnixSeconds, SkyframeError> {
    let epoch = Epoch::from_str(date.trim())
        .map_err(|e| SkyframeError::Format(format!("invalid date {date:?}: {e}")))?;
    Ok(epoch.to_unix_seconds())
}

/// Convert an instant to a [`hifitime::Epoch`].
pub fn instant_to_epoch(instant: UnixSeconds) -> Epoch {
    Epoch::from_unix_seconds(instant)
}
