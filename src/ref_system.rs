//! # Reference frame of the sky model
//!
//! Catalog and ephemeris coordinates are turned into unit vectors of one fixed equatorial
//! frame, and that frame is oriented toward a local horizon by a single composed rotation.
//!
//! ## Axis convention
//!
//! ```text
//!   y  : celestial north pole (sine of declination, the renderer's "up")
//!   x  : RA = 0h on the celestial equator
//!   z  : RA = 18h on the celestial equator (RA is sign-flipped, see below)
//! ```
//!
//! Right ascension is negated once, here, before the trigonometry: the catalog epoch and the
//! renderer's world-space handedness disagree, and every caller goes through
//! [`to_direction`] so the flip is never re-applied elsewhere.
//!
//! ## Observer rotation
//!
//! [`observer_rotation`] composes, from identity and in this order:
//!
//! 1. `(90 - latitude)` degrees about X,
//! 2. `-(longitude + offset)` degrees about Y,
//! 3. the sidereal angle about Y.
//!
//! The product is rebuilt in full for every change of its inputs.
use nalgebra::{Rotation3, Unit, Vector3};

use crate::constants::{Degree, Radian, EPS, MAX_LATITUDE, RADEG};
use crate::skyframe_errors::SkyframeError;

/// Unit vector of the fixed equatorial frame, before any observer rotation.
///
/// A `Direction` can only be obtained from [`to_direction`] (or from another `Direction`), so
/// its norm is always 1 within floating tolerance and all components are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction(Unit<Vector3<f64>>);

impl Direction {
    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Borrow the underlying unit vector.
    pub fn as_unit(&self) -> &Unit<Vector3<f64>> {
        &self.0
    }

    pub fn into_inner(self) -> Vector3<f64> {
        self.0.into_inner()
    }

    /// Recover `(ra, dec)` in degrees from the direction.
    ///
    /// Inverse of [`to_direction`]: RA is returned in `[0, 360)`, Dec in `[-90, 90]`.
    /// At the poles the RA is undefined and comes out as whatever `atan2(±0, ±0)` gives.
    pub fn to_radec(&self) -> (Degree, Degree) {
        let dec = self.0.y.clamp(-1.0, 1.0).asin() / RADEG;
        let flipped_ra = self.0.z.atan2(self.0.x);
        let mut ra = (-flipped_ra / RADEG).rem_euclid(360.0);
        if ra >= 360.0 {
            ra = 0.0;
        }
        (ra, dec)
    }

    /// Angular separation with another direction, in degrees.
    pub fn separation(&self, other: &Direction) -> Degree {
        self.0.angle(&other.0) / RADEG
    }
}

/// Convert an equatorial `(ra, dec)` pair in degrees to a [`Direction`].
///
/// Arguments
/// ---------
/// * `ra_degrees`: right ascension, any finite value (the angle is periodic)
/// * `dec_degrees`: declination in `[-90, 90]`
///
/// Return
/// ------
/// * The unit vector `(cos ra' cos dec, sin dec, sin ra' cos dec)` with `ra' = -ra`.
/// * [`SkyframeError::InvalidAngle`] if an input or a resulting component is not finite,
///   or if the declination is outside its domain.
pub fn to_direction(ra_degrees: Degree, dec_degrees: Degree) -> Result<Direction, SkyframeError> {
    if !ra_degrees.is_finite() || !dec_degrees.is_finite() {
        return Err(SkyframeError::InvalidAngle(format!(
            "non-finite coordinates (ra = {ra_degrees}, dec = {dec_degrees})"
        )));
    }
    if dec_degrees.abs() > MAX_LATITUDE {
        return Err(SkyframeError::InvalidAngle(format!(
            "declination {dec_degrees} outside [-90, 90]"
        )));
    }

    let ra_radians: Radian = -ra_degrees * RADEG;
    let dec_radians: Radian = dec_degrees * RADEG;

    let v = Vector3::new(
        ra_radians.cos() * dec_radians.cos(),
        dec_radians.sin(),
        ra_radians.sin() * dec_radians.cos(),
    );

    if !v.iter().all(|c| c.is_finite()) {
        return Err(SkyframeError::InvalidAngle(format!(
            "non-finite direction for ra = {ra_degrees}, dec = {dec_degrees}"
        )));
    }
    if (v.norm() - 1.0).abs() > EPS {
        return Err(SkyframeError::InvalidAngle(format!(
            "direction for ra = {ra_degrees}, dec = {dec_degrees} is not a unit vector"
        )));
    }

    Ok(Direction(Unit::new_unchecked(v)))
}

/// Construct a right-handed rotation around one of the principal axes (X, Y, or Z).
///
/// Rotation axis of [`rotmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Active rotation of a vector by `alpha` radians, counter-clockwise when looking down the axis
/// toward the origin.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians
/// * `axis`: rotation axis
///
/// Return
/// ------
/// * The rotation matrix.
pub fn rotmt(alpha: Radian, axis: Axis) -> Rotation3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, alpha)
}

/// Compose the rotation orienting the equatorial frame to an observer's horizon.
///
/// Arguments
/// ---------
/// * `latitude`: observer latitude in degrees
/// * `longitude`: observer longitude in degrees, east positive
/// * `longitude_offset`: calibration constant added to the longitude, in degrees
/// * `sidereal_angle`: current sidereal angle in radians
///
/// Return
/// ------
/// * `Rx(90 - lat) · Ry(-(long + offset)) · Ry(sidereal)`, built from identity.
pub fn observer_rotation(
    latitude: Degree,
    longitude: Degree,
    longitude_offset: Degree,
    sidereal_angle: Radian,
) -> Rotation3<f64> {
    let lat_angle = (90.0 - latitude) * RADEG;
    let long_angle = -(longitude + longitude_offset) * RADEG;

    let mut rot = Rotation3::identity();
    rot *= rotmt(lat_angle, Axis::X);
    rot *= rotmt(long_angle, Axis::Y);
    rot *= rotmt(sidereal_angle, Axis::Y);
    rot
}
