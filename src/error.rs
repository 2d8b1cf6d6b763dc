//! Error types for geared-stepper.
//!
//! Only configuration and hardware faults are errors. Control deviations are
//! numeric and handled inside the loop by clamping.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all geared-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor driver (pin) error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Actuator key not found in configuration
    ActuatorNotFound(heapless::String<32>),
    /// Invalid gear ratio (must be > 0)
    InvalidGearRatio(f32),
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Invalid max acceleration (must be > 0)
    InvalidMaxAcceleration(f32),
    /// Invalid angle limits (min must be < max)
    InvalidLimits {
        /// Minimum limit value
        min: f32,
        /// Maximum limit value
        max: f32,
    },
    /// Invalid PI gains (must be finite and >= 0)
    InvalidGains {
        /// Proportional gain
        kp: f32,
        /// Integral gain
        ki: f32,
    },
    /// Sample period of zero milliseconds
    InvalidSamplePeriod(u32),
    /// Pulse width of zero microseconds
    InvalidPulseWidth(u32),
    /// Builder was missing a required field
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(
                    f,
                    "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256",
                    v
                )
            }
            ConfigError::ActuatorNotFound(name) => write!(f, "Actuator '{}' not found", name),
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidMaxSpeed(v) => {
                write!(f, "Invalid max speed: {} rpm. Must be > 0", v)
            }
            ConfigError::InvalidMaxAcceleration(v) => {
                write!(f, "Invalid max acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidLimits { min, max } => {
                write!(f, "Invalid angle limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidGains { kp, ki } => {
                write!(f, "Invalid PI gains: kp={} ki={}. Must be finite and >= 0", kp, ki)
            }
            ConfigError::InvalidSamplePeriod(v) => {
                write!(f, "Invalid sample period: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid pulse width: {} us. Must be > 0", v)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
