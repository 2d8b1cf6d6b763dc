//! Configuration module for geared-stepper.
//!
//! Provides types for loading and validating actuator configurations from
//! TOML files (with `std` feature) or pre-parsed data, and the constants the
//! drive derives from them at setup.

mod actuator;
mod constants;
mod limits;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use actuator::{ActuatorConfig, PiGains};
pub use constants::DriveConstants;
pub use limits::AngleLimits;
pub use system::{SystemConfig, MAX_ACTUATORS};
pub use validation::{validate_actuator, validate_config};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, DegreesPerSec, DegreesPerSecSquared, Microsteps, Rpm};
