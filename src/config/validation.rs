//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{ActuatorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every actuator entry:
/// - Gear ratio, max speed and max acceleration are positive
/// - Angle limits are ordered (min < max)
/// - PI gains are finite and non-negative
/// - Sample period and pulse width are non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, actuator) in config.actuators.iter() {
        validate_actuator(actuator)?;
    }

    Ok(())
}

/// Validate a single actuator configuration.
pub fn validate_actuator(config: &ActuatorConfig) -> Result<()> {
    if config.gear_ratio <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidGearRatio(config.gear_ratio)));
    }

    if config.max_speed_rpm.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(config.max_speed_rpm.0)));
    }

    if config.max_acceleration.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxAcceleration(
            config.max_acceleration.0,
        )));
    }

    if !config.limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidLimits {
            min: config.limits.min.0,
            max: config.limits.max.0,
        }));
    }

    if !config.gains.is_valid() {
        return Err(Error::Config(ConfigError::InvalidGains {
            kp: config.gains.kp,
            ki: config.gains.ki,
        }));
    }

    if config.sample_period_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidSamplePeriod(config.sample_period_ms)));
    }

    if config.pulse_width_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(config.pulse_width_us)));
    }

    Ok(())
}
