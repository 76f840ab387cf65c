//! # Constants and type definitions for skyframe
//!
//! This module centralizes the **unit conversions**, **day lengths**, **epoch references** and
//! **display calibration defaults** shared by every transform in the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, hours ↔ degrees)
//! - Two distinct day lengths: the **solar day** used by Julian dates and the **sidereal day**
//!   used by the sidereal clock. They both describe "a day" but must never be interchanged.
//! - Epoch references (zero sidereal angle, J2000.0)
//! - Display calibration (magnitude curve, longitude offset)
//! - Core type aliases
//!
//! All values are process-wide and immutable.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours of right ascension → degrees
pub const DEG_PER_HOUR: f64 = 15.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// Day lengths
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a solar (Julian) day. Used for Julian date arithmetic only.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Length of the sidereal day in seconds (Earth rotation relative to the stars).
pub const SIDEREAL_DAY_SECONDS: f64 = 86_164.0905;

// -------------------------------------------------------------------------------------------------
// Epoch references
// -------------------------------------------------------------------------------------------------

/// Instant (Unix seconds) at which the sidereal rotation of the frame is defined to be zero:
/// 1970-01-01T00:00:00Z.
pub const SIDEREAL_EPOCH_UNIX: UnixSeconds = 0.0;

/// J2000.0 reference instant, 2000-01-01T12:00:00Z, in Unix seconds
pub const J2000_UNIX_SECONDS: UnixSeconds = 946_728_000.0;

/// Julian date of J2000.0
pub const JD_J2000: JulianDate = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// -------------------------------------------------------------------------------------------------
// Display calibration
// -------------------------------------------------------------------------------------------------

/// Calibration added to the observer longitude before the Y-axis rotation.
///
/// It reconciles the zero-RA meridian of the catalog epoch with true north. It has no
/// astronomical derivation and is kept at zero for the retained set of epoch constants.
pub const LONGITUDE_CALIBRATION_DEG: Degree = 0.0;

/// Largest display size handed to the renderer (magnitude → size curve asymptote).
pub const DEFAULT_MAX_SIZE: f64 = 1500.0;

/// Steepness of the logistic magnitude → size curve.
pub const DEFAULT_STEEPNESS: f64 = 0.6;

/// Apparent visual magnitude of the Sun
pub const SUN_APPARENT_MAGNITUDE: f64 = -26.74;

// -------------------------------------------------------------------------------------------------
// Observer domain
// -------------------------------------------------------------------------------------------------

pub const MIN_LATITUDE: Degree = -90.0;
pub const MAX_LATITUDE: Degree = 90.0;
pub const MIN_LONGITUDE: Degree = -180.0;
pub const MAX_LONGITUDE: Degree = 180.0;

/// Observer location the frame starts from when no other is configured (Baltimore, MD).
pub const DEFAULT_LATITUDE: Degree = 39.0;
pub const DEFAULT_LONGITUDE: Degree = -76.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Instant expressed as seconds since 1970-01-01T00:00:00Z
pub type UnixSeconds = f64;
/// Julian date (days)
pub type JulianDate = f64;
