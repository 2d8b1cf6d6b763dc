//! Builder pattern for GearedStepperDrive.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{ActuatorConfig, DriveConstants, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::observer::{DriveObserver, NoopObserver};

use super::driver::GearedStepperDrive;
use super::pulse::PulseExecutor;

/// Builder for creating GearedStepperDrive instances.
pub struct GearedStepperDriveBuilder<CLK, DIR, EN, D, O = NoopObserver>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
    O: DriveObserver,
{
    clock_pin: Option<CLK>,
    direction_pin: Option<DIR>,
    enable_pin: Option<EN>,
    delay: Option<D>,
    name: Option<heapless::String<32>>,
    constants: Option<DriveConstants>,
    observer: O,
}

impl<CLK, DIR, EN, D> Default for GearedStepperDriveBuilder<CLK, DIR, EN, D, NoopObserver>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<CLK, DIR, EN, D> GearedStepperDriveBuilder<CLK, DIR, EN, D, NoopObserver>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            clock_pin: None,
            direction_pin: None,
            enable_pin: None,
            delay: None,
            name: None,
            constants: None,
            observer: NoopObserver,
        }
    }
}

impl<CLK, DIR, EN, D, O> GearedStepperDriveBuilder<CLK, DIR, EN, D, O>
where
    CLK: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
    O: DriveObserver,
{
    /// Set the clock/step pin.
    pub fn clock_pin(mut self, pin: CLK) -> Self {
        self.clock_pin = Some(pin);
        self
    }

    /// Set the direction pin.
    pub fn direction_pin(mut self, pin: DIR) -> Self {
        self.direction_pin = Some(pin);
        self
    }

    /// Set the enable pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the joint name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Use precomputed constants.
    pub fn constants(mut self, constants: DriveConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    /// Attach a diagnostics sink.
    pub fn observer<O2: DriveObserver>(
        self,
        observer: O2,
    ) -> GearedStepperDriveBuilder<CLK, DIR, EN, D, O2> {
        GearedStepperDriveBuilder {
            clock_pin: self.clock_pin,
            direction_pin: self.direction_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            name: self.name,
            constants: self.constants,
            observer,
        }
    }

    /// Configure from an ActuatorConfig.
    pub fn from_actuator_config(mut self, config: &ActuatorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.constants = Some(DriveConstants::from_config(config));
        self
    }

    /// Configure from SystemConfig by actuator key.
    pub fn from_config(self, config: &SystemConfig, key: &str) -> Result<Self> {
        let actuator = config.actuator(key).ok_or_else(|| {
            Error::Config(ConfigError::ActuatorNotFound(
                heapless::String::try_from(key).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_actuator_config(actuator))
    }

    /// Build the drive. It starts disabled, with a null trajectory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if a pin, the delay or the
    /// constants were not supplied.
    pub fn build(self) -> Result<GearedStepperDrive<CLK, DIR, EN, D, O>> {
        let clock_pin = self
            .clock_pin
            .ok_or(Error::Config(ConfigError::MissingField("clock_pin")))?;
        let direction_pin = self
            .direction_pin
            .ok_or(Error::Config(ConfigError::MissingField("direction_pin")))?;
        let enable_pin = self
            .enable_pin
            .ok_or(Error::Config(ConfigError::MissingField("enable_pin")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;
        let constants = self
            .constants
            .ok_or(Error::Config(ConfigError::MissingField("constants")))?;

        let name = match self.name {
            Some(name) => name,
            None => heapless::String::try_from("actuator").unwrap_or_default(),
        };

        let pulse = PulseExecutor::new(clock_pin, direction_pin, enable_pin, delay, &constants);
        Ok(GearedStepperDrive::new(pulse, constants, name, self.observer))
    }
}
