//! Unit tests for configuration validation.

use geared_stepper::config::{parse_config, validate_config, SystemConfig};
use geared_stepper::error::{ConfigError, Error};

fn actuator_toml(overrides: &str) -> String {
    format!(
        r#"
[actuators.joint]
name = "Joint"
steps_per_revolution = 200
microsteps = 16
max_speed_rpm = 30.0
max_acceleration_deg_per_sec2 = 180.0
{overrides}

[actuators.joint.limits]
min_degrees = -90.0
max_degrees = 90.0

[actuators.joint.gains]
kp = 1.0
ki = 0.1
"#
    )
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config: SystemConfig =
        toml::from_str(&actuator_toml("gear_ratio = 4.0")).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation rejects a non-positive gear ratio.
#[test]
fn test_zero_gear_ratio_rejected() {
    let result = parse_config(&actuator_toml("gear_ratio = 0.0"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidGearRatio(_)))
    ));
}

/// Test validation rejects a zero sample period.
#[test]
fn test_zero_sample_period_rejected() {
    let result = parse_config(&actuator_toml("sample_period_ms = 0"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidSamplePeriod(0)))
    ));
}

/// Test validation rejects a zero pulse width.
#[test]
fn test_zero_pulse_width_rejected() {
    let result = parse_config(&actuator_toml("pulse_width_us = 0"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidPulseWidth(0)))
    ));
}

/// Test validation rejects negative gains.
#[test]
fn test_negative_gain_rejected() {
    let toml_str = actuator_toml("").replace("kp = 1.0", "kp = -1.0");
    let result = parse_config(&toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidGains { .. }))
    ));
}

/// Test validation rejects a zero speed ceiling.
#[test]
fn test_zero_max_speed_rejected() {
    let toml_str = actuator_toml("").replace("max_speed_rpm = 30.0", "max_speed_rpm = 0.0");
    let result = parse_config(&toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
    ));
}

/// Test validation rejects equal limits.
#[test]
fn test_empty_limit_range_rejected() {
    let toml_str = actuator_toml("").replace("min_degrees = -90.0", "min_degrees = 90.0");
    let result = parse_config(&toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidLimits { .. }))
    ));
}
