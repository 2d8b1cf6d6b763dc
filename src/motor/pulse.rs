//! Clock, direction and enable lines of one stepper driver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Degrees;
use crate::config::DriveConstants;
use crate::error::{MotorError, Result};
use crate::motion::{Direction, StepSink};

/// Drives the three output lines and keeps the angle estimate.
///
/// Generic over:
/// - `CLK`: clock/step pin (must implement `OutputPin`)
/// - `DIR`: direction pin (must implement `OutputPin`)
/// - `EN`: enable pin (must implement `OutputPin`)
/// - `D`: delay provider for the pulse width (must implement `DelayNs`)
pub struct PulseExecutor<CLK, DIR, EN, D>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    clock_pin: CLK,
    direction_pin: DIR,
    enable_pin: EN,
    delay: D,

    /// Last direction written; `None` until the first write.
    current_direction: Option<Direction>,

    /// Angle estimate, advanced by one microstep per step while enabled.
    current_angle: Degrees,

    enabled: bool,
    angle_per_microstep: f32,
    invert_direction: bool,
    pulse_width_us: u32,
    enable_settle_us: u32,
}

impl<CLK, DIR, EN, D> PulseExecutor<CLK, DIR, EN, D>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the pins. No line is written until the first command.
    pub fn new(
        clock_pin: CLK,
        direction_pin: DIR,
        enable_pin: EN,
        delay: D,
        constants: &DriveConstants,
    ) -> Self {
        Self {
            clock_pin,
            direction_pin,
            enable_pin,
            delay,
            current_direction: None,
            current_angle: Degrees(0.0),
            enabled: false,
            angle_per_microstep: constants.angle_per_microstep,
            invert_direction: constants.invert_direction,
            pulse_width_us: constants.pulse_width_us,
            enable_settle_us: constants.enable_settle_us,
        }
    }

    /// Select the step direction. The pin is only written on a change.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        if self.direction_level(direction) {
            self.direction_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.direction_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    /// Emit one step pulse in the current direction.
    ///
    /// The clock stays HIGH for the full pulse width. The angle estimate only
    /// moves while enabled.
    pub fn step(&mut self) -> Result<()> {
        self.clock_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(self.pulse_width_us);
        self.clock_pin.set_low().map_err(|_| MotorError::PinError)?;

        if self.enabled {
            let direction = self.current_direction.unwrap_or(Direction::Forward);
            if self.direction_level(direction) {
                self.current_angle.0 += self.angle_per_microstep;
            } else {
                self.current_angle.0 -= self.angle_per_microstep;
            }
        }

        Ok(())
    }

    /// Power the driver stage on or off.
    ///
    /// The clock is pulled LOW and allowed to settle before the enable line
    /// changes, so a half-finished pulse cannot latch a step.
    pub fn enable(&mut self, on: bool) -> Result<()> {
        self.enabled = on;

        self.clock_pin.set_low().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(self.enable_settle_us);

        if on {
            self.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.enable_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        Ok(())
    }

    /// Overwrite the angle estimate.
    #[inline]
    pub fn set_current_angle(&mut self, angle: Degrees) {
        self.current_angle = angle;
    }

    /// Angle estimate.
    #[inline]
    pub fn current_angle(&self) -> Degrees {
        self.current_angle
    }

    /// Whether the driver stage is powered.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last direction written to the pin.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (CLK, DIR, EN, D) {
        (
            self.clock_pin,
            self.direction_pin,
            self.enable_pin,
            self.delay,
        )
    }

    /// Level of the direction line for `direction`; HIGH is forward unless inverted.
    #[inline]
    fn direction_level(&self, direction: Direction) -> bool {
        direction.is_forward() != self.invert_direction
    }
}

impl<CLK, DIR, EN, D> StepSink for PulseExecutor<CLK, DIR, EN, D>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    type Error = crate::error::Error;

    fn step_forward(&mut self) -> Result<()> {
        self.set_direction(Direction::Forward)?;
        self.step()
    }

    fn step_backward(&mut self) -> Result<()> {
        self.set_direction(Direction::Backward)?;
        self.step()
    }
}
