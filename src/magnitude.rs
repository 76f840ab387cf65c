use crate::constants::{DEFAULT_MAX_SIZE, DEFAULT_STEEPNESS};
use crate::skyframe_errors::SkyframeError;

/// Largest `|steepness · vmag|` fed to the exponential. Past it the curve is flat, which keeps
/// every size strictly inside `(0, max_size)` in `f64`.
const MAX_EXPONENT: f64 = 30.0;

/// Map an apparent magnitude to a display size.
///
/// The curve is a logistic `max_size / (1 + exp(steepness · vmag))`: bright objects (very
/// negative magnitudes) approach `max_size` and faint objects approach zero. The size strictly
/// decreases with `vmag` while `|steepness · vmag| <= 30` (|vmag| <= 50 with the default
/// steepness) and saturates beyond, just below `max_size` on the bright side and just above
/// zero on the faint side.
///
/// `max_size` and `steepness` are display calibration picked for legibility on screen. They do
/// not model any photometric law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeScaler {
    max_size: f64,
    steepness: f64,
}

impl Default for MagnitudeScaler {
    fn default() -> Self {
        MagnitudeScaler {
            max_size: DEFAULT_MAX_SIZE,
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl MagnitudeScaler {
    /// Build a scaler with custom calibration.
    ///
    /// Both values must be finite and strictly positive, otherwise
    /// [`SkyframeError::InvalidFrameParams`] is returned.
    pub fn new(max_size: f64, steepness: f64) -> Result<Self, SkyframeError> {
        if !(max_size.is_finite() && max_size > 0.0) {
            return Err(SkyframeError::InvalidFrameParams(format!(
                "max_size must be finite and > 0, got {max_size}"
            )));
        }
        if !(steepness.is_finite() && steepness > 0.0) {
            return Err(SkyframeError::InvalidFrameParams(format!(
                "steepness must be finite and > 0, got {steepness}"
            )));
        }
        Ok(MagnitudeScaler {
            max_size,
            steepness,
        })
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    pub fn steepness(&self) -> f64 {
        self.steepness
    }

    /// Display size for `vmag`, always in the open interval `(0, max_size)`.
    ///
    /// A non-finite magnitude is rejected with [`SkyframeError::OutOfRange`].
    pub fn size_for_magnitude(&self, vmag: f64) -> Result<f64, SkyframeError> {
        if !vmag.is_finite() {
            return Err(SkyframeError::OutOfRange(format!(
                "magnitude {vmag} is not finite"
            )));
        }
        let exponent = (self.steepness * vmag).clamp(-MAX_EXPONENT, MAX_EXPONENT);
        Ok(self.max_size / (1.0 + exponent.exp()))
    }
}
