//! Step timing.
//!
//! [`StepGenerator`] turns a target step position and an acceleration
//! ceiling into timed steps; a [`StepSink`] executes them.

mod ramp;
mod sink;

pub use ramp::StepGenerator;
pub use sink::{Direction, StepSink};
