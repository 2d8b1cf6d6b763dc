//! Discrete PI law.

use crate::config::PiGains;

/// Proportional and integral contributions of one update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiOutput {
    /// `kp * error`.
    pub proportional: f32,
    /// `ki * integral`.
    pub integral: f32,
}

impl PiOutput {
    /// Total correction.
    #[inline]
    pub fn total(&self) -> f32 {
        self.proportional + self.integral
    }
}

/// PI controller acting on an error expressed in microsteps.
///
/// The integral has no clamp; it is cleared only by [`PiController::reset`],
/// which the drive calls whenever it is enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiController {
    gains: PiGains,
    integral: f32,
}

impl PiController {
    /// Create a controller with an empty integral.
    pub const fn new(gains: PiGains) -> Self {
        Self {
            gains,
            integral: 0.0,
        }
    }

    /// Accumulate `error * dt_secs` and compute the PI terms.
    pub fn update(&mut self, error: f32, dt_secs: f32) -> PiOutput {
        self.integral += error * dt_secs;
        PiOutput {
            proportional: self.gains.kp * error,
            integral: self.gains.ki * self.integral,
        }
    }

    /// Clear the integral accumulator.
    #[inline]
    pub fn reset(&mut self) {
        self.integral = 0.0;
    }

    /// Accumulated `error * dt`.
    #[inline]
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// Current gains.
    #[inline]
    pub fn gains(&self) -> PiGains {
        self.gains
    }

    /// Replace the gains, keeping the accumulator.
    pub fn set_gains(&mut self, gains: PiGains) {
        self.gains = gains;
    }
}
