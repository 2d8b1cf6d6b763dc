//! Per-sample diagnostics.
//!
//! The drive never logs on its own from the control path. Instead it hands a
//! [`SampleReport`] to an injected [`DriveObserver`] after every control
//! sample, so a host can plot or record the loop without the library
//! depending on a logger.

use crate::config::units::Degrees;

/// Everything one control sample computed.
///
/// Step quantities are microsteps; accelerations are microsteps/s².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    /// Measurement time.
    pub now_ms: u32,
    /// Setpoint at `now_ms`.
    pub to_be: Degrees,
    /// Setpoint of the previous sample.
    pub last_to_be: Degrees,
    /// Setpoint one sample period ahead.
    pub to_be_next: Degrees,
    /// Encoder angle.
    pub measured: Degrees,
    /// Feed-forward travel of this sample.
    pub feed_forward_steps: f32,
    /// Feed-forward travel of the next sample.
    pub next_feed_forward_steps: f32,
    /// Setpoint minus measurement.
    pub error_steps: f32,
    /// Proportional correction.
    pub proportional: f32,
    /// Integral correction.
    pub integral: f32,
    /// Feed-forward plus correction; the relative move handed to the ramp.
    pub travel_steps: f32,
    /// Acceleration before limiting.
    pub raw_acceleration: f32,
    /// Acceleration after doubling and clamping; its magnitude becomes the
    /// ramp's acceleration ceiling.
    pub acceleration: f32,
}

/// Receives drive diagnostics. All methods default to doing nothing.
pub trait DriveObserver {
    /// Called after each control sample that ran the PI law.
    fn on_sample(&mut self, _report: &SampleReport) {}

    /// Called when the drive is enabled (`true`) or disabled (`false`).
    fn on_enable(&mut self, _enabled: bool) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DriveObserver for NoopObserver {}

impl<T: DriveObserver + ?Sized> DriveObserver for &mut T {
    fn on_sample(&mut self, report: &SampleReport) {
        (**self).on_sample(report);
    }

    fn on_enable(&mut self, enabled: bool) {
        (**self).on_enable(enabled);
    }
}
