//! Acceleration-bounded step generation.
//!
//! Implements the per-step interval recurrence of a trapezoidal speed ramp:
//! the first interval after rest is `c0 = 0.676 * sqrt(2 / a)` seconds, each
//! following one is `cn = cn-1 - 2 * cn-1 / (4n + 1)`, and a negative `n`
//! walks the same recurrence backwards to decelerate. Speed is always adjusted
//! from its current value, so retargeting mid-move never causes a jump.

use libm::{fabsf, sqrtf};

use super::sink::{Direction, StepSink};

/// Bound on the ramp step counter, so `4n + 1` stays in range.
const MAX_RAMP_STEPS: i64 = i32::MAX as i64;

/// Convert a step count computed in floating point to a bounded ramp counter.
#[inline]
fn ramp_steps(steps: f32) -> i64 {
    (steps as i64).clamp(-MAX_RAMP_STEPS, MAX_RAMP_STEPS)
}

/// Converts a target step position and an acceleration ceiling into
/// correctly timed steps.
///
/// Non-blocking: [`StepGenerator::tick`] is meant to be called on every
/// iteration of the control loop and only steps when the current interval has
/// elapsed.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepGenerator {
    /// Running step position.
    current_position: i64,
    /// Position the ramp converges on.
    target_position: i64,
    /// Signed speed in steps/s.
    speed: f32,
    /// Speed ceiling in steps/s.
    max_speed: f32,
    /// Acceleration ceiling in steps/s².
    acceleration: f32,
    /// Time between steps; 0 means stopped.
    step_interval_us: u32,
    last_step_time_us: u32,
    /// Ramp step counter; negative while decelerating.
    n: i64,
    /// Initial interval after rest, in µs.
    c0: f32,
    /// Current interval, in µs.
    cn: f32,
    /// Interval at max speed, in µs.
    cmin: f32,
    direction: Direction,
}

impl Default for StepGenerator {
    fn default() -> Self {
        Self {
            current_position: 0,
            target_position: 0,
            speed: 0.0,
            max_speed: 0.0,
            acceleration: 0.0,
            step_interval_us: 0,
            last_step_time_us: 0,
            n: 0,
            c0: 0.0,
            cn: 0.0,
            cmin: 1.0,
            direction: Direction::Forward,
        }
    }
}

impl StepGenerator {
    /// Create a stopped generator at position 0 with the given ceilings.
    pub fn new(max_speed: f32, acceleration: f32) -> Self {
        let mut generator = Self::default();
        generator.set_max_speed(max_speed);
        generator.set_acceleration_limit(acceleration);
        generator
    }

    /// Set the speed ceiling in steps/s. Zero halts the generator.
    pub fn set_max_speed(&mut self, speed: f32) {
        let speed = fabsf(speed);
        if self.max_speed == speed {
            return;
        }

        self.max_speed = speed;
        if speed > 0.0 {
            self.cmin = 1_000_000.0 / speed;
        }

        if speed == 0.0 {
            self.compute_new_speed();
        } else if self.n > 0 && self.acceleration > 0.0 {
            // Continue the ramp from the step count of the current speed.
            self.n = ramp_steps((self.speed * self.speed) / (2.0 * self.acceleration));
            self.compute_new_speed();
        }
    }

    /// Set the acceleration ceiling in steps/s². Zero is ignored.
    ///
    /// The ramp counter is rescaled so the current speed is preserved. A tiny
    /// ceiling only saturates the counter; the ramp then holds its speed.
    pub fn set_acceleration_limit(&mut self, acceleration: f32) {
        if acceleration == 0.0 {
            return;
        }

        let acceleration = fabsf(acceleration);
        if self.acceleration == acceleration {
            return;
        }

        self.n = ramp_steps(self.n as f32 * (self.acceleration / acceleration));
        self.c0 = 0.676 * sqrtf(2.0 / acceleration) * 1_000_000.0;
        self.acceleration = acceleration;
        self.compute_new_speed();
    }

    /// Set an absolute target position.
    pub fn move_to(&mut self, absolute: i64) {
        if self.target_position != absolute {
            self.target_position = absolute;
            self.compute_new_speed();
        }
    }

    /// Set a target position relative to the current position.
    pub fn move_by(&mut self, relative: i64) {
        self.move_to(self.current_position.saturating_add(relative));
    }

    /// Step if one is due at `now_us`, then recompute the next interval.
    ///
    /// Returns whether a step was executed.
    pub fn tick<S: StepSink>(&mut self, now_us: u32, sink: &mut S) -> Result<bool, S::Error> {
        if !self.run_speed(now_us, sink)? {
            return Ok(false);
        }

        self.compute_new_speed();
        Ok(true)
    }

    /// Running step position.
    #[inline]
    pub fn current_position(&self) -> i64 {
        self.current_position
    }

    /// Position the ramp converges on.
    #[inline]
    pub fn target_position(&self) -> i64 {
        self.target_position
    }

    /// Steps left until the target.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.target_position.saturating_sub(self.current_position)
    }

    /// Signed speed in steps/s.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed ceiling in steps/s.
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Acceleration ceiling in steps/s².
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Time between steps at the current speed; 0 when stopped.
    #[inline]
    pub fn step_interval_us(&self) -> u32 {
        self.step_interval_us
    }

    /// Whether the generator is still moving or has distance left.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.speed != 0.0 || self.distance_to_go() != 0
    }

    fn run_speed<S: StepSink>(&mut self, now_us: u32, sink: &mut S) -> Result<bool, S::Error> {
        if self.step_interval_us == 0 {
            return Ok(false);
        }

        if now_us.wrapping_sub(self.last_step_time_us) < self.step_interval_us {
            return Ok(false);
        }

        sink.step_towards(self.direction)?;
        self.current_position += self.direction.sign();
        self.last_step_time_us = now_us;
        Ok(true)
    }

    fn halt(&mut self) {
        self.step_interval_us = 0;
        self.speed = 0.0;
        self.n = 0;
    }

    fn compute_new_speed(&mut self) {
        if self.max_speed <= 0.0 || self.acceleration <= 0.0 {
            self.halt();
            return;
        }

        let distance_to = self.distance_to_go();
        let steps_to_stop = ramp_steps((self.speed * self.speed) / (2.0 * self.acceleration));

        if distance_to == 0 && steps_to_stop <= 1 {
            self.halt();
            return;
        }

        if distance_to > 0 {
            if self.n > 0 {
                // Too close to stop in time, or still heading away: brake.
                if steps_to_stop >= distance_to || self.direction == Direction::Backward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0
                && steps_to_stop < distance_to
                && self.direction == Direction::Forward
            {
                self.n = -self.n;
            }
        } else if distance_to < 0 {
            if self.n > 0 {
                if steps_to_stop >= -distance_to || self.direction == Direction::Forward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0
                && steps_to_stop < -distance_to
                && self.direction == Direction::Backward
            {
                self.n = -self.n;
            }
        }

        if self.n == 0 {
            self.cn = self.c0;
            self.direction = if distance_to > 0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
        } else {
            self.cn -= (2.0 * self.cn) / ((4 * self.n) as f32 + 1.0);
            self.cn = self.cn.max(self.cmin);
        }
        self.n = self.n.saturating_add(1);

        self.step_interval_us = self.cn as u32;
        self.speed = 1_000_000.0 / self.cn;
        if self.direction == Direction::Backward {
            self.speed = -self.speed;
        }
    }
}
