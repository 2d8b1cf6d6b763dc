//! Unit tests for TOML configuration parsing.

use geared_stepper::config::{load_config, DriveConstants, SystemConfig};
use geared_stepper::config::units::Microsteps;

/// Test parsing a complete actuator configuration from TOML.
#[test]
fn test_parse_actuator_config() {
    let toml_str = r#"
[actuators.elbow]
name = "Elbow"
steps_per_revolution = 200
microsteps = 16
gear_ratio = 9.0
max_speed_rpm = 20.0
max_acceleration_deg_per_sec2 = 120.0
invert_direction = true
sample_period_ms = 20
pulse_width_us = 5
enable_settle_us = 250

[actuators.elbow.limits]
min_degrees = -100.0
max_degrees = 100.0

[actuators.elbow.gains]
kp = 1.5
ki = 0.25
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let elbow = config.actuator("elbow").expect("Actuator not found");

    assert_eq!(elbow.name.as_str(), "Elbow");
    assert_eq!(elbow.steps_per_revolution, 200);
    assert_eq!(elbow.microsteps, Microsteps::SIXTEENTH);
    assert_eq!(elbow.gear_ratio, 9.0);
    assert_eq!(elbow.max_speed_rpm.0, 20.0);
    assert_eq!(elbow.max_acceleration.0, 120.0);
    assert!(elbow.invert_direction);
    assert_eq!(elbow.limits.min.0, -100.0);
    assert_eq!(elbow.limits.max.0, 100.0);
    assert_eq!(elbow.gains.kp, 1.5);
    assert_eq!(elbow.gains.ki, 0.25);
    assert_eq!(elbow.sample_period_ms, 20);
    assert_eq!(elbow.pulse_width_us, 5);
    assert_eq!(elbow.enable_settle_us, 250);
}

/// Test that optional keys fall back to their defaults.
#[test]
fn test_defaults_applied() {
    let toml_str = r#"
[actuators.base]
name = "Base"
steps_per_revolution = 200
microsteps = 4
max_speed_rpm = 10.0
max_acceleration_deg_per_sec2 = 90.0

[actuators.base.limits]
min_degrees = -170.0
max_degrees = 170.0

[actuators.base.gains]
kp = 1.0
ki = 0.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let base = config.actuator("base").expect("Actuator not found");

    assert_eq!(base.gear_ratio, 1.0);
    assert!(!base.invert_direction);
    assert_eq!(base.sample_period_ms, 10);
    assert_eq!(base.pulse_width_us, 2);
    assert_eq!(base.enable_settle_us, 100);
}

/// Test that an invalid microstep value fails to deserialize.
#[test]
fn test_invalid_microsteps_rejected() {
    let toml_str = r#"
[actuators.base]
name = "Base"
steps_per_revolution = 200
microsteps = 12
max_speed_rpm = 10.0
max_acceleration_deg_per_sec2 = 90.0

[actuators.base.limits]
min_degrees = -170.0
max_degrees = 170.0

[actuators.base.gains]
kp = 1.0
ki = 0.0
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that missing gains fail to deserialize.
#[test]
fn test_missing_gains_rejected() {
    let toml_str = r#"
[actuators.base]
name = "Base"
steps_per_revolution = 200
microsteps = 4
max_speed_rpm = 10.0
max_acceleration_deg_per_sec2 = 90.0

[actuators.base.limits]
min_degrees = -170.0
max_degrees = 170.0
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test derived constants from a parsed configuration.
#[test]
fn test_constants_from_parsed_config() {
    let toml_str = r#"
[actuators.shoulder]
name = "Shoulder"
steps_per_revolution = 200
microsteps = 16
gear_ratio = 1.125
max_speed_rpm = 10.0
max_acceleration_deg_per_sec2 = 100.0
sample_period_ms = 25

[actuators.shoulder.limits]
min_degrees = -90.0
max_degrees = 90.0

[actuators.shoulder.gains]
kp = 1.0
ki = 0.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let constants = DriveConstants::from_config(config.actuator("shoulder").unwrap());

    // 3600 microsteps per revolution: 0.1 degree each
    assert!((constants.angle_per_microstep - 0.1).abs() < 1e-6);
    // 10 rpm = 60 deg/s = 600 steps/s
    assert!((constants.max_steps_per_sec - 600.0).abs() < 0.1);
    // 100 deg/s² = 1000 steps/s²
    assert!((constants.max_step_acceleration - 1000.0).abs() < 0.1);
    assert!((constants.sample_frequency - 40.0).abs() < 1e-3);
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let toml_str = r#"
[actuators.gripper]
name = "Gripper"
steps_per_revolution = 200
microsteps = 2
max_speed_rpm = 60.0
max_acceleration_deg_per_sec2 = 720.0

[actuators.gripper.limits]
min_degrees = 0.0
max_degrees = 60.0

[actuators.gripper.gains]
kp = 0.5
ki = 0.1
"#;

    let path = std::env::temp_dir().join("geared_stepper_load_config_test.toml");
    std::fs::write(&path, toml_str).expect("Failed to write config file");

    let config = load_config(&path).expect("Failed to load config");
    assert!(config.actuator("gripper").is_some());

    let _ = std::fs::remove_file(&path);
}

/// Test that a missing file reports an I/O error.
#[test]
fn test_load_config_missing_file() {
    let result = load_config("/nonexistent/geared_stepper/arm.toml");
    assert!(result.is_err());
}
