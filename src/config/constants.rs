//! Drive constants derived from actuator configuration.

use super::actuator::{ActuatorConfig, PiGains};
use super::limits::AngleLimits;

/// Derived parameters computed once from an [`ActuatorConfig`].
///
/// Everything the control loop needs at runtime is here, already converted to
/// microsteps and seconds, so the hot path never touches the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConstants {
    /// Microsteps per actuator revolution (steps × microsteps × gear ratio).
    pub microsteps_per_revolution: f32,

    /// Actuator angle in degrees moved by one microstep.
    pub angle_per_microstep: f32,

    /// Step rate ceiling in microsteps per second.
    pub max_steps_per_sec: f32,

    /// Acceleration ceiling in microsteps per second squared.
    pub max_step_acceleration: f32,

    /// Range absolute moves are clamped into.
    pub limits: AngleLimits,

    /// Position loop gains.
    pub gains: PiGains,

    /// Encoder sample period in milliseconds.
    pub sample_period_ms: u32,

    /// Encoder sample period in seconds.
    pub sample_period_secs: f32,

    /// `1 / sample_period_secs`.
    pub sample_frequency: f32,

    /// Whether the direction line is wired inverted.
    pub invert_direction: bool,

    /// Minimum HIGH time of a step pulse in microseconds.
    pub pulse_width_us: u32,

    /// Clock-LOW settle time before the enable line changes, in microseconds.
    pub enable_settle_us: u32,
}

impl DriveConstants {
    /// Compute drive constants from actuator configuration.
    pub fn from_config(config: &ActuatorConfig) -> Self {
        let microsteps_per_revolution = config.microsteps_per_revolution();
        let angle_per_microstep = 360.0 / microsteps_per_revolution;

        let max_steps_per_sec =
            config.max_speed_rpm.to_degrees_per_sec().value() / angle_per_microstep;
        let max_step_acceleration = config.max_acceleration.value() / angle_per_microstep;

        let sample_period_secs = config.sample_period_ms as f32 / 1000.0;
        let sample_frequency = if sample_period_secs > 0.0 {
            1.0 / sample_period_secs
        } else {
            0.0
        };

        Self {
            microsteps_per_revolution,
            angle_per_microstep,
            max_steps_per_sec,
            max_step_acceleration,
            limits: config.limits,
            gains: config.gains,
            sample_period_ms: config.sample_period_ms,
            sample_period_secs,
            sample_frequency,
            invert_direction: config.invert_direction,
            pulse_width_us: config.pulse_width_us,
            enable_settle_us: config.enable_settle_us,
        }
    }

    /// Convert an actuator angle (degrees) to microsteps.
    #[inline]
    pub fn microsteps_by_angle(&self, degrees: f32) -> f32 {
        degrees / self.angle_per_microstep
    }

    /// Convert microsteps to an actuator angle (degrees).
    #[inline]
    pub fn angle_by_microsteps(&self, steps: f32) -> f32 {
        steps * self.angle_per_microstep
    }
}
