//! # Observer location
//!
//! The observer is a geodetic `(latitude, longitude)` pair in degrees, north and east positive.
//! It only changes through validated constructors: an out-of-domain value is rejected with
//! [`SkyframeError::OutOfRange`], never clamped.
//!
//! Raw user input goes through [`parse_latitude`] / [`parse_longitude`] (free text fields) or
//! [`city::parse_city_value`] (city picker entries) before it reaches
//! [`ObservationFrame::set_location`](crate::observation_frame::ObservationFrame::set_location).
pub mod city;

use crate::constants::{Degree, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::skyframe_errors::SkyframeError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverLocation {
    latitude: Degree,
    longitude: Degree,
}

impl ObserverLocation {
    /// Build a validated observer location.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: degrees in `[-90, 90]`
    /// * `longitude`: degrees in `[-180, 180]`, east positive
    ///
    /// Return
    /// ------
    /// * The location, or [`SkyframeError::OutOfRange`] naming the offending coordinate.
    pub fn new(latitude: Degree, longitude: Degree) -> Result<Self, SkyframeError> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(ObserverLocation {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> Degree {
        self.latitude
    }

    pub fn longitude(&self) -> Degree {
        self.longitude
    }
}

fn check_latitude(latitude: Degree) -> Result<(), SkyframeError> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(SkyframeError::OutOfRange(format!(
            "latitude {latitude} outside [{MIN_LATITUDE}, {MAX_LATITUDE}]"
        )));
    }
    Ok(())
}

fn check_longitude(longitude: Degree) -> Result<(), SkyframeError> {
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(SkyframeError::OutOfRange(format!(
            "longitude {longitude} outside [{MIN_LONGITUDE}, {MAX_LONGITUDE}]"
        )));
    }
    Ok(())
}

fn parse_decimal(input: &str, what: &str) -> Result<Degree, SkyframeError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| SkyframeError::Format(format!("{what} {input:?} is not a decimal number")))?;
    if !value.is_finite() {
        return Err(SkyframeError::Format(format!("{what} {input:?} is not finite")));
    }
    Ok(value)
}

/// Parse a latitude typed by the user (decimal degrees, surrounding blanks allowed).
///
/// Returns [`SkyframeError::Format`] for non-numeric text and [`SkyframeError::OutOfRange`]
/// outside `[-90, 90]`.
pub fn parse_latitude(input: &str) -> Result<Degree, SkyframeError> {
    let latitude = parse_decimal(input, "latitude")?;
    check_latitude(latitude)?;
    Ok(latitude)
}

/// Parse a longitude typed by the user; same rules as [`parse_latitude`] on `[-180, 180]`.
pub fn parse_longitude(input: &str) -> Result<Degree, SkyframeError> {
    let longitude = parse_decimal(input, "longitude")?;
    check_longitude(longitude)?;
    Ok(longitude)
}
