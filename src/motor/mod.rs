//! Motor module for geared-stepper.
//!
//! Provides the pulse executor that owns the driver pins and the drive that
//! closes the loop around it.

mod builder;
mod driver;
mod pulse;
mod state;

pub use builder::GearedStepperDriveBuilder;
pub use driver::GearedStepperDrive;
pub use pulse::PulseExecutor;
pub use state::DriveState;
