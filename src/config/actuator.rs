//! Actuator configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::AngleLimits;
use super::units::{DegreesPerSecSquared, Microsteps, Rpm};

/// Proportional and integral gains of the position loop.
///
/// Both act on the error expressed in microsteps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiGains {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
}

impl PiGains {
    /// Create a gain pair.
    pub const fn new(kp: f32, ki: f32) -> Self {
        Self { kp, ki }
    }

    /// Gains must be finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.kp.is_finite() && self.ki.is_finite() && self.kp >= 0.0 && self.ki >= 0.0
    }
}

/// Complete configuration of one geared stepper joint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActuatorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Base steps per motor revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Driver microstep setting.
    pub microsteps: Microsteps,

    /// Gear reduction between motor and actuator (9.0 means 9:1).
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f32,

    /// Speed ceiling of the actuator output.
    pub max_speed_rpm: Rpm,

    /// Acceleration ceiling of the actuator output.
    #[serde(rename = "max_acceleration_deg_per_sec2")]
    pub max_acceleration: DegreesPerSecSquared,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Range absolute moves are clamped into.
    pub limits: AngleLimits,

    /// Position loop gains.
    pub gains: PiGains,

    /// Period at which the encoder delivers measurements.
    #[serde(default = "default_sample_period_ms")]
    pub sample_period_ms: u32,

    /// Minimum HIGH time of a step pulse.
    #[serde(default = "default_pulse_width_us")]
    pub pulse_width_us: u32,

    /// Time the clock line is held LOW before the enable line changes.
    #[serde(default = "default_enable_settle_us")]
    pub enable_settle_us: u32,
}

fn default_gear_ratio() -> f32 {
    1.0
}

fn default_sample_period_ms() -> u32 {
    10
}

fn default_pulse_width_us() -> u32 {
    2
}

fn default_enable_settle_us() -> u32 {
    100
}

impl ActuatorConfig {
    /// Microsteps per revolution of the actuator output.
    pub fn microsteps_per_revolution(&self) -> f32 {
        self.steps_per_revolution as f32 * self.microsteps.value() as f32 * self.gear_ratio
    }

    /// Actuator angle moved by one microstep.
    pub fn angle_per_microstep(&self) -> f32 {
        360.0 / self.microsteps_per_revolution()
    }
}
