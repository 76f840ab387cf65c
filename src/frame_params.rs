//! # Observation frame configuration
//!
//! [`FrameParams`] gathers every tunable of an [`ObservationFrame`](crate::observation_frame::ObservationFrame):
//! the longitude calibration, the display size curve, the start-up observer and the bodies
//! requested from the ephemeris service.
//!
//! Defaults
//! -----------------
//! * `longitude_offset_deg`: 0.0
//! * `max_size`: 1500.0
//! * `steepness`: 0.6
//! * `initial_latitude`: 39.0
//! * `initial_longitude`: -76.0
//! * `tracked_bodies`: Moon, Mercury, Venus, Mars, Jupiter, Saturn, Uranus, Neptune
//! * `ephemeris_step`: 60 minutes
//!
//! ```rust
//! use skyframe::frame_params::FrameParams;
//!
//! let params = FrameParams::builder()
//!     .initial_location(48.85, 2.35)
//!     .steepness(0.5)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.initial_latitude, 48.85);
//! ```
use std::fmt;

use crate::constants::{
    Degree, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_MAX_SIZE, DEFAULT_STEEPNESS,
    LONGITUDE_CALIBRATION_DEG,
};
use crate::jpl_request::horizon_ids::TrackedBody;
use crate::jpl_request::Step;
use crate::magnitude::MagnitudeScaler;
use crate::observers::ObserverLocation;
use crate::skyframe_errors::SkyframeError;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    /// Calibration added to the observer longitude before the meridian rotation. It aligns the
    /// catalog zero-RA meridian with true north for the chosen sidereal epoch.
    pub longitude_offset_deg: Degree,

    // --- display size curve ---
    pub max_size: f64,
    pub steepness: f64,

    // --- start-up observer ---
    pub initial_latitude: Degree,
    pub initial_longitude: Degree,

    // --- ephemeris service ---
    pub tracked_bodies: Vec<TrackedBody>,
    pub ephemeris_step: Step,
}

impl FrameParams {
    /// Create a new [`FrameParamsBuilder`] starting from the default values.
    pub fn builder() -> FrameParamsBuilder {
        FrameParamsBuilder::new()
    }

    pub fn scaler(&self) -> Result<MagnitudeScaler, SkyframeError> {
        MagnitudeScaler::new(self.max_size, self.steepness)
    }

    pub fn initial_location(&self) -> Result<ObserverLocation, SkyframeError> {
        ObserverLocation::new(self.initial_latitude, self.initial_longitude)
    }

    /// Check every field, whether the parameters come from the builder or a struct literal.
    ///
    /// Every failure is reported as [`SkyframeError::InvalidFrameParams`].
    pub fn validate(&self) -> Result<(), SkyframeError> {
        if !self.longitude_offset_deg.is_finite() {
            return Err(SkyframeError::InvalidFrameParams(
                "longitude_offset_deg must be finite".into(),
            ));
        }
        self.scaler()
            .map_err(|e| SkyframeError::InvalidFrameParams(e.to_string()))?;
        self.initial_location()
            .map_err(|e| SkyframeError::InvalidFrameParams(e.to_string()))?;

        if self.tracked_bodies.contains(&TrackedBody::Sun) {
            return Err(SkyframeError::InvalidFrameParams(
                "the Sun is computed locally and cannot be a tracked body".into(),
            ));
        }
        if self.ephemeris_step.value == 0 {
            return Err(SkyframeError::InvalidFrameParams(
                "ephemeris_step must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FrameParams {
    fn default() -> Self {
        FrameParams {
            longitude_offset_deg: LONGITUDE_CALIBRATION_DEG,
            max_size: DEFAULT_MAX_SIZE,
            steepness: DEFAULT_STEEPNESS,
            initial_latitude: DEFAULT_LATITUDE,
            initial_longitude: DEFAULT_LONGITUDE,
            tracked_bodies: TrackedBody::DEFAULT_SET.to_vec(),
            ephemeris_step: Step::default(),
        }
    }
}

/// Builder for [`FrameParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct FrameParamsBuilder {
    params: FrameParams,
}

impl FrameParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: FrameParams::default(),
        }
    }

    pub fn longitude_offset_deg(mut self, v: Degree) -> Self {
        self.params.longitude_offset_deg = v;
        self
    }
    pub fn max_size(mut self, v: f64) -> Self {
        self.params.max_size = v;
        self
    }
    pub fn steepness(mut self, v: f64) -> Self {
        self.params.steepness = v;
        self
    }
    pub fn initial_location(mut self, latitude: Degree, longitude: Degree) -> Self {
        self.params.initial_latitude = latitude;
        self.params.initial_longitude = longitude;
        self
    }
    pub fn tracked_bodies(mut self, bodies: Vec<TrackedBody>) -> Self {
        self.params.tracked_bodies = bodies;
        self
    }
    pub fn ephemeris_step(mut self, step: Step) -> Self {
        self.params.ephemeris_step = step;
        self
    }

    /// Validate and return the parameters.
    ///
    /// See [`FrameParams::validate`].
    pub fn build(self) -> Result<FrameParams, SkyframeError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

impl fmt::Display for FrameParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Observation frame parameters")?;
        writeln!(f, "  longitude_offset_deg = {}", self.longitude_offset_deg)?;
        writeln!(f, "  max_size             = {}", self.max_size)?;
        writeln!(f, "  steepness            = {}", self.steepness)?;
        writeln!(
            f,
            "  initial location     = ({}, {})",
            self.initial_latitude, self.initial_longitude
        )?;
        writeln!(f, "  ephemeris_step       = {}", self.ephemeris_step)?;
        let bodies: Vec<&str> = self.tracked_bodies.iter().map(|b| b.name()).collect();
        write!(f, "  tracked_bodies       = [{}]", bodies.join(", "))
    }
}

#[cfg(test)]
mod frame_params_test {
    use super::*;
    use crate::jpl_request::StepUnit;

    #[test]
    fn test_default_params() {
        let params = FrameParams::default();
        assert_eq!(params.longitude_offset_deg, 0.0);
        assert_eq!(params.max_size, 1500.0);
        assert_eq!(params.steepness, 0.6);
        assert_eq!(params.tracked_bodies.len(), 8);
        assert_eq!(params.ephemeris_step.to_string(), "60m");
        assert_eq!(FrameParams::builder().build(), Ok(params));
    }

    #[test]
    fn test_builder() {
        let params = FrameParams::builder()
            .longitude_offset_deg(49.0)
            .max_size(800.0)
            .tracked_bodies(vec![TrackedBody::Moon])
            .ephemeris_step(Step::new(1, StepUnit::Days))
            .build()
            .unwrap();
        assert_eq!(params.longitude_offset_deg, 49.0);
        assert_eq!(params.scaler().unwrap().max_size(), 800.0);
        assert_eq!(params.tracked_bodies, vec![TrackedBody::Moon]);
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            FrameParams::builder().max_size(0.0).build(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));
        assert!(matches!(
            FrameParams::builder().steepness(f64::NAN).build(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));
        assert!(matches!(
            FrameParams::builder().initial_location(91.0, 0.0).build(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));
        assert!(matches!(
            FrameParams::builder()
                .longitude_offset_deg(f64::INFINITY)
                .build(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));
        assert!(matches!(
            FrameParams::builder()
                .tracked_bodies(vec![TrackedBody::Sun])
                .build(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));
        assert!(matches!(
            FrameParams::builder()
                .ephemeris_step(Step::new(0, StepUnit::Hours))
                .build(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));
    }

    #[test]
    fn test_validate_struct_literal() {
        let params = FrameParams {
            longitude_offset_deg: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(SkyframeError::InvalidFrameParams(
                "longitude_offset_deg must be finite".into()
            ))
        );

        let params = FrameParams {
            tracked_bodies: vec![TrackedBody::Moon, TrackedBody::Sun],
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SkyframeError::InvalidFrameParams(_))
        ));

        assert_eq!(FrameParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_display() {
        let text = FrameParams::default().to_string();
        assert!(text.contains("steepness            = 0.6"));
        assert!(text.contains("Moon, Mercury, Venus"));
    }
}
