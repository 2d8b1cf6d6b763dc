//! # geared-stepper
//!
//! Closed-loop control of a geared stepper actuator with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Trajectory tracking**: Linear angle trajectories sampled every control period
//! - **Closed loop**: PI correction on top of feed-forward, driven by an absolute encoder
//! - **Bounded ramps**: Acceleration-limited step timing, retargetable mid-move
//! - **embedded-hal 1.0**: Uses `OutputPin` for CLOCK/DIR/ENABLE, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geared_stepper::{Degrees, GearedStepperDrive, SystemConfig};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = geared_stepper::load_config("arm.toml")?;
//!
//! // Create the drive with embedded-hal pins
//! let mut drive = GearedStepperDrive::builder()
//!     .from_config(&config, "elbow")?
//!     .clock_pin(clock_pin)
//!     .direction_pin(dir_pin)
//!     .enable_pin(enable_pin)
//!     .delay(delay)
//!     .build()?;
//!
//! drive.enable()?;
//! loop {
//!     if let Some(angle) = encoder.poll() {
//!         drive.on_measurement(angle, millis());
//!     }
//!     drive.tick(micros())?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod control;
pub mod error;
pub mod motion;
pub mod motor;
pub mod observer;
pub mod trajectory;

// Re-exports for ergonomic API
pub use config::{validate_config, ActuatorConfig, DriveConstants, SystemConfig};
pub use control::{FeedbackController, PiController};
pub use error::{Error, Result};
pub use motion::{Direction, StepGenerator, StepSink};
pub use motor::{DriveState, GearedStepperDrive, GearedStepperDriveBuilder, PulseExecutor};
pub use observer::{DriveObserver, NoopObserver, SampleReport};
pub use trajectory::Trajectory;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, DegreesPerSec, DegreesPerSecSquared, Microsteps, Rpm};
