//! Angle limit configuration.

use serde::Deserialize;

use super::units::Degrees;

/// Angle range an absolute move may target.
///
/// Out-of-range targets are always clamped, never rejected: the control loop
/// has no error channel for a bad setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleLimits {
    /// Minimum allowed angle in degrees.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Maximum allowed angle in degrees.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,
}

impl AngleLimits {
    /// Create new angle limits.
    pub fn new(min: Degrees, max: Degrees) -> Self {
        Self { min, max }
    }

    /// Check if limits are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 < self.max.0
    }

    /// Check if an angle is within limits.
    pub fn contains(&self, angle: Degrees) -> bool {
        angle.0 >= self.min.0 && angle.0 <= self.max.0
    }

    /// Clamp an angle into `[min, max]`.
    pub fn clamp(&self, angle: Degrees) -> Degrees {
        angle.clamp(self.min, self.max)
    }
}
