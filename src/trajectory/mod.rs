//! Trajectory module for geared-stepper.
//!
//! Provides the time-parameterized setpoint the feedback loop tracks.

mod linear;

pub use linear::Trajectory;
