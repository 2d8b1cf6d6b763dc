//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use geared_stepper::config::{AngleLimits, DriveConstants, PiGains};
use geared_stepper::{Degrees, DriveObserver, SampleReport};

/// One of the three driver lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Clock,
    Direction,
    Enable,
}

/// Something that happened on the bus, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Set(Line, bool),
    DelayNs(u32),
}

/// Shared log of pin writes and delays.
#[derive(Clone, Default)]
pub struct Bus {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> LoggedPin {
        LoggedPin {
            line,
            events: self.events.clone(),
        }
    }

    pub fn delay(&self) -> LoggedDelay {
        LoggedDelay {
            events: self.events.clone(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: Event) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn writes_to(&self, line: Line) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Set(l, _) if *l == line))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Output pin that logs every write.
pub struct LoggedPin {
    line: Line,
    events: Rc<RefCell<Vec<Event>>>,
}

impl ErrorType for LoggedPin {
    type Error = Infallible;
}

impl OutputPin for LoggedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.events.borrow_mut().push(Event::Set(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.events.borrow_mut().push(Event::Set(self.line, true));
        Ok(())
    }
}

/// Delay that logs the requested duration and returns immediately.
pub struct LoggedDelay {
    events: Rc<RefCell<Vec<Event>>>,
}

impl DelayNs for LoggedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.events.borrow_mut().push(Event::DelayNs(ns));
    }
}

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin whose every write fails.
pub struct FailingPin;

impl ErrorType for FailingPin {
    type Error = PinFault;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

/// Observer that keeps everything it is told.
#[derive(Default)]
pub struct RecordingObserver {
    pub samples: Vec<SampleReport>,
    pub enables: Vec<bool>,
}

impl DriveObserver for RecordingObserver {
    fn on_sample(&mut self, report: &SampleReport) {
        self.samples.push(*report);
    }

    fn on_enable(&mut self, enabled: bool) {
        self.enables.push(enabled);
    }
}

/// 0.1° per microstep, 1000 steps/s, 1000 steps/s², kp = 1, ki = 0.
pub fn test_constants(sample_period_ms: u32) -> DriveConstants {
    let sample_period_secs = sample_period_ms as f32 / 1000.0;
    DriveConstants {
        microsteps_per_revolution: 3600.0,
        angle_per_microstep: 0.1,
        max_steps_per_sec: 1000.0,
        max_step_acceleration: 1000.0,
        limits: AngleLimits::new(Degrees(-90.0), Degrees(90.0)),
        gains: PiGains::new(1.0, 0.0),
        sample_period_ms,
        sample_period_secs,
        sample_frequency: 1.0 / sample_period_secs,
        invert_direction: false,
        pulse_width_us: 2,
        enable_settle_us: 100,
    }
}
