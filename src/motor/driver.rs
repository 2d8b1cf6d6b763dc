//! Closed-loop geared stepper drive.
//!
//! Generic over embedded-hal 1.0 pin types; wires the trajectory, the
//! feedback controller, the step generator and the pulse executor of one
//! joint together.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Degrees;
use crate::config::{AngleLimits, DriveConstants, PiGains};
use crate::control::FeedbackController;
use crate::error::Result;
use crate::motion::StepGenerator;
use crate::observer::{DriveObserver, NoopObserver, SampleReport};
use crate::trajectory::Trajectory;

use super::builder::GearedStepperDriveBuilder;
use super::pulse::PulseExecutor;
use super::state::DriveState;

/// One actuator of the arm.
///
/// Two entry points are driven from the same control thread:
/// - [`tick`](Self::tick) on every loop iteration, which steps when a step is due;
/// - [`on_measurement`](Self::on_measurement) whenever the encoder has a new
///   sample, which retargets the step generator.
///
/// A measurement applied between two ticks is visible to the very next tick.
///
/// Generic over:
/// - `CLK`: clock/step pin (must implement `OutputPin`)
/// - `DIR`: direction pin (must implement `OutputPin`)
/// - `EN`: enable pin (must implement `OutputPin`)
/// - `D`: delay provider (must implement `DelayNs`)
/// - `O`: diagnostics sink (defaults to [`NoopObserver`])
pub struct GearedStepperDrive<CLK, DIR, EN, D, O = NoopObserver>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
    O: DriveObserver,
{
    /// Joint name for logging/debugging.
    name: heapless::String<32>,

    /// Derived constants from configuration.
    constants: DriveConstants,

    /// Pins and the angle estimate.
    pulse: PulseExecutor<CLK, DIR, EN, D>,

    /// Trajectory and PI state.
    controller: FeedbackController,

    /// Speed ramp.
    ramp: StepGenerator,

    observer: O,
}

impl<CLK, DIR, EN, D> GearedStepperDrive<CLK, DIR, EN, D, NoopObserver>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    /// Start building a drive.
    pub fn builder() -> GearedStepperDriveBuilder<CLK, DIR, EN, D, NoopObserver> {
        GearedStepperDriveBuilder::new()
    }
}

impl<CLK, DIR, EN, D, O> GearedStepperDrive<CLK, DIR, EN, D, O>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
    O: DriveObserver,
{
    /// Create a disabled drive with a null trajectory.
    pub(crate) fn new(
        pulse: PulseExecutor<CLK, DIR, EN, D>,
        constants: DriveConstants,
        name: heapless::String<32>,
        observer: O,
    ) -> Self {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "DRIVE {}: {} deg/microstep, max {} steps/s, max {} steps/s2, sample {} ms",
            name.as_str(),
            constants.angle_per_microstep,
            constants.max_steps_per_sec,
            constants.max_step_acceleration,
            constants.sample_period_ms
        );

        Self {
            name,
            constants,
            pulse,
            controller: FeedbackController::new(&constants),
            ramp: StepGenerator::new(constants.max_steps_per_sec, constants.max_step_acceleration),
            observer,
        }
    }

    /// Move to an absolute angle over `duration_ms`.
    ///
    /// The target is clamped into the configured limits. Until the first
    /// measurement has arrived this does nothing and returns `false`.
    pub fn set_angle(&mut self, angle: Degrees, duration_ms: u32, now_ms: u32) -> bool {
        let current = self.pulse.current_angle();
        self.controller.command_absolute_move(current, angle, duration_ms, now_ms)
    }

    /// Move by `delta` from the current angle estimate over `duration_ms`.
    pub fn change_angle(&mut self, delta: Degrees, duration_ms: u32, now_ms: u32) {
        let current = self.pulse.current_angle();
        self.controller.command_relative_move(current, delta, duration_ms, now_ms);
    }

    /// Drop the trajectory and stop correcting.
    pub fn hold(&mut self) {
        self.controller.hold();
    }

    /// Feed an encoder sample through the control loop.
    ///
    /// The sample always becomes the angle estimate. When a trajectory is
    /// active the resulting travel and acceleration are pushed into the step
    /// generator and the report is returned.
    pub fn on_measurement(&mut self, measured: Degrees, now_ms: u32) -> Option<SampleReport> {
        self.pulse.set_current_angle(measured);

        let report = self.controller.on_measurement(measured, now_ms)?;

        let acceleration = libm::fabsf(report.acceleration);
        self.ramp.set_acceleration_limit(acceleration);
        self.ramp.move_by(report.travel_steps as i64);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "DRIVE {}: t={} to_be={} measured={} travel={} acc={}",
            self.name.as_str(),
            now_ms,
            report.to_be.value(),
            measured.value(),
            report.travel_steps,
            report.acceleration
        );

        self.observer.on_sample(&report);
        Some(report)
    }

    /// Step if one is due at `now_us`.
    ///
    /// Returns whether a step was executed.
    pub fn tick(&mut self, now_us: u32) -> Result<bool> {
        self.ramp.tick(now_us, &mut self.pulse)
    }

    /// Power the driver stage and clear the integral.
    pub fn enable(&mut self) -> Result<()> {
        self.pulse.enable(true)?;
        self.controller.reset_integral();

        #[cfg(feature = "defmt")]
        defmt::debug!("DRIVE {}: enabled", self.name.as_str());

        self.observer.on_enable(true);
        Ok(())
    }

    /// Power the driver stage off. Angle and trajectory are kept.
    pub fn disable(&mut self) -> Result<()> {
        self.pulse.enable(false)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("DRIVE {}: disabled", self.name.as_str());

        self.observer.on_enable(false);
        Ok(())
    }

    /// Replace limits, gains and sample period at runtime.
    pub fn configure(&mut self, limits: AngleLimits, gains: PiGains, sample_period_ms: u32) {
        self.controller.configure(limits, gains, sample_period_ms);
        self.constants = *self.controller.constants();
    }

    /// Overwrite the angle estimate without running the loop.
    #[inline]
    pub fn set_current_angle(&mut self, angle: Degrees) {
        self.pulse.set_current_angle(angle);
    }

    /// Angle estimate: the last measurement, advanced by steps since.
    #[inline]
    pub fn current_angle(&self) -> Degrees {
        self.pulse.current_angle()
    }

    /// Whether a measurement has arrived.
    #[inline]
    pub fn current_angle_available(&self) -> bool {
        self.controller.current_angle_available()
    }

    /// Whether the driver stage is powered.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.pulse.is_enabled()
    }

    /// Power state.
    #[inline]
    pub fn state(&self) -> DriveState {
        DriveState::from(self.pulse.is_enabled())
    }

    /// Accumulated integral of the step error.
    #[inline]
    pub fn integral(&self) -> f32 {
        self.controller.integral()
    }

    /// Active trajectory.
    #[inline]
    pub fn trajectory(&self) -> &Trajectory {
        self.controller.trajectory()
    }

    /// Step generator state.
    #[inline]
    pub fn step_generator(&self) -> &StepGenerator {
        &self.ramp
    }

    /// Get the joint name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the derived constants.
    #[inline]
    pub fn constants(&self) -> &DriveConstants {
        &self.constants
    }

    /// Diagnostics sink.
    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Diagnostics sink, mutably.
    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (CLK, DIR, EN, D) {
        self.pulse.release()
    }
}
