//! Closed-loop joint simulation.
//!
//! Builds one actuator from TOML, wires it to simulated pins and a simulated
//! encoder with gear backlash, and prints how the loop tracks a move.

use std::cell::Cell;
use std::rc::Rc;

use geared_stepper::{parse_config, Degrees, DriveObserver, GearedStepperDrive, SampleReport};

/// Shared state of the simulated motor.
#[derive(Default)]
struct Motor {
    /// Microsteps the motor shaft has turned.
    position: Cell<i64>,
    /// Level of the direction line.
    forward: Cell<bool>,
    /// Level of the enable line.
    powered: Cell<bool>,
}

enum Role {
    Clock,
    Direction,
    Enable,
}

/// Output pin feeding the simulated motor.
struct SimPin {
    role: Role,
    motor: Rc<Motor>,
    level: bool,
}

impl SimPin {
    fn new(role: Role, motor: &Rc<Motor>) -> Self {
        Self {
            role,
            motor: motor.clone(),
            level: false,
        }
    }
}

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        match self.role {
            Role::Clock => {
                // The driver steps on the rising edge, only while powered
                if !self.level && self.motor.powered.get() {
                    let step = if self.motor.forward.get() { 1 } else { -1 };
                    self.motor.position.set(self.motor.position.get() + step);
                }
            }
            Role::Direction => self.motor.forward.set(true),
            Role::Enable => self.motor.powered.set(true),
        }
        self.level = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        match self.role {
            Role::Clock => {}
            Role::Direction => self.motor.forward.set(false),
            Role::Enable => self.motor.powered.set(false),
        }
        self.level = false;
        Ok(())
    }
}

/// The pulse width is a busy wait on hardware; the simulation skips it.
struct SimDelay;

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Encoder on the output shaft, behind a gear with backlash.
struct Encoder {
    angle: f32,
    backlash: f32,
}

impl Encoder {
    fn read(&mut self, motor_angle: f32) -> Degrees {
        // The output only follows once the play is taken up
        if motor_angle - self.angle > self.backlash / 2.0 {
            self.angle = motor_angle - self.backlash / 2.0;
        } else if self.angle - motor_angle > self.backlash / 2.0 {
            self.angle = motor_angle + self.backlash / 2.0;
        }
        Degrees(self.angle)
    }
}

/// Prints every tenth sample.
#[derive(Default)]
struct Printer {
    samples: u32,
}

impl DriveObserver for Printer {
    fn on_sample(&mut self, report: &SampleReport) {
        if self.samples % 10 == 0 {
            println!(
                "t={:5} ms to_be={:7.2} measured={:7.2} error={:6.1} travel={:6.1} acc={:7.1}",
                report.now_ms,
                report.to_be.value(),
                report.measured.value(),
                report.error_steps,
                report.travel_steps,
                report.acceleration,
            );
        }
        self.samples += 1;
    }

    fn on_enable(&mut self, enabled: bool) {
        println!("driver {}", if enabled { "enabled" } else { "disabled" });
    }
}

const ARM_CONFIG: &str = r#"
[actuators.elbow]
name = "Elbow"
steps_per_revolution = 200
microsteps = 16
gear_ratio = 9.0
max_speed_rpm = 10.0
max_acceleration_deg_per_sec2 = 120.0
sample_period_ms = 10

[actuators.elbow.limits]
min_degrees = -120.0
max_degrees = 120.0

[actuators.elbow.gains]
kp = 0.8
ki = 0.4
"#;

fn main() {
    println!("=== Closed Loop Joint Simulation ===\n");

    let config = parse_config(ARM_CONFIG).expect("Failed to parse configuration");
    let motor = Rc::new(Motor::default());

    let mut drive = GearedStepperDrive::builder()
        .from_config(&config, "elbow")
        .expect("Actuator not found")
        .clock_pin(SimPin::new(Role::Clock, &motor))
        .direction_pin(SimPin::new(Role::Direction, &motor))
        .enable_pin(SimPin::new(Role::Enable, &motor))
        .delay(SimDelay)
        .observer(Printer::default())
        .build()
        .expect("Failed to build drive");

    let angle_per_microstep = drive.constants().angle_per_microstep;
    let sample_period_ms = drive.constants().sample_period_ms;
    println!(
        "{}: {:.4} deg/microstep, {:.0} steps/s max\n",
        drive.name(),
        angle_per_microstep,
        drive.constants().max_steps_per_sec
    );

    let mut encoder = Encoder {
        angle: 0.0,
        backlash: 0.5,
    };

    drive.enable().expect("Failed to enable drive");

    // Prime the angle estimate, then command an absolute move
    drive.on_measurement(encoder.read(0.0), 0);
    drive.set_angle(Degrees(30.0), 2000, 0);

    let mut now_us: u32 = 0;
    for now_ms in 1..4000u32 {
        if now_ms == 2500 {
            println!("\n-> back to -15 degrees\n");
            drive.set_angle(Degrees(-15.0), 1000, now_ms);
        }

        if now_ms % sample_period_ms == 0 {
            let motor_angle = motor.position.get() as f32 * angle_per_microstep;
            drive.on_measurement(encoder.read(motor_angle), now_ms);
        }

        for _ in 0..50 {
            now_us = now_us.wrapping_add(20);
            drive.tick(now_us).expect("Step failed");
        }
    }

    drive.disable().expect("Failed to disable drive");

    let motor_angle = motor.position.get() as f32 * angle_per_microstep;
    println!(
        "\nFinal: motor {:.2} deg, output {:.2} deg, estimate {:.2} deg",
        motor_angle,
        encoder.read(motor_angle).value(),
        drive.current_angle().value()
    );
}
