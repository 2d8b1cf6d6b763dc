//! Closed-loop position control against a trajectory.

use crate::config::units::Degrees;
use crate::config::{AngleLimits, DriveConstants, PiGains};
use crate::observer::SampleReport;
use crate::trajectory::Trajectory;

use super::pi::PiController;

/// Limit the acceleration computed for one sample.
///
/// A positive `raw` acceleration means the feed-forward rate is falling
/// relative to the error, i.e. the joint should brake. When it points the same
/// way as the commanded travel, the value is doubled before clamping so that
/// deceleration is twice as aggressive as acceleration. Otherwise it is only
/// clamped to `[-max, max]`.
pub fn limit_sample_acceleration(raw: f32, travel: f32, max: f32) -> f32 {
    let braking = (travel > 0.0 && raw > 0.0) || (travel < 0.0 && raw < 0.0);
    if braking {
        (raw * 2.0).clamp(-max, max)
    } else {
        raw.clamp(-max, max)
    }
}

/// Feedback controller of one joint.
///
/// Owns the trajectory and the PI state. Each encoder sample is turned into a
/// relative move (feed-forward plus PI trim) and an acceleration ceiling for
/// the step generator. The angle estimate itself lives with the pulse
/// executor; callers pass it in.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedbackController {
    constants: DriveConstants,
    trajectory: Trajectory,
    current_angle_available: bool,
    last_to_be_angle: Degrees,
    pi: PiController,
}

impl FeedbackController {
    /// Create a controller with a null trajectory and no measurement yet.
    pub fn new(constants: &DriveConstants) -> Self {
        Self {
            constants: *constants,
            trajectory: Trajectory::null(),
            current_angle_available: false,
            last_to_be_angle: Degrees(0.0),
            pi: PiController::new(constants.gains),
        }
    }

    /// Replace limits, gains and sample period.
    ///
    /// Recomputes the sample frequency. The integral is kept. A zero
    /// `sample_period_ms` is ignored and the previous period stays in force.
    pub fn configure(&mut self, limits: AngleLimits, gains: PiGains, sample_period_ms: u32) {
        self.constants.limits = limits;
        self.constants.gains = gains;
        self.pi.set_gains(gains);

        if sample_period_ms == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("FEEDBACK: zero sample period ignored");
            return;
        }

        let sample_period_secs = sample_period_ms as f32 / 1000.0;
        self.constants.sample_period_ms = sample_period_ms;
        self.constants.sample_period_secs = sample_period_secs;
        self.constants.sample_frequency = 1.0 / sample_period_secs;
    }

    /// Move by `delta` from `current` over `duration_ms`, starting at `now_ms`.
    ///
    /// Works before any measurement has arrived; `current` is then whatever
    /// the estimate holds.
    pub fn command_relative_move(
        &mut self,
        current: Degrees,
        delta: Degrees,
        duration_ms: u32,
        now_ms: u32,
    ) {
        self.trajectory.set(current, current + delta, now_ms, duration_ms);
    }

    /// Move to `target`, clamped into the configured limits.
    ///
    /// The move starts from the running setpoint, or from `current` when no
    /// trajectory is active. Returns `false` and does nothing until the first
    /// measurement has arrived.
    pub fn command_absolute_move(
        &mut self,
        current: Degrees,
        target: Degrees,
        duration_ms: u32,
        now_ms: u32,
    ) -> bool {
        if !self.current_angle_available {
            return false;
        }

        let target = self.constants.limits.clamp(target);
        let start = self.trajectory.angle_at(now_ms).unwrap_or(current);
        self.trajectory.set(start, target, now_ms, duration_ms);
        true
    }

    /// Run one control sample.
    ///
    /// Returns `None` while the trajectory is null; neither the PI law nor the
    /// integral is touched then. The first call only primes the previous
    /// setpoint with the measurement.
    pub fn on_measurement(&mut self, measured: Degrees, now_ms: u32) -> Option<SampleReport> {
        if !self.current_angle_available {
            self.last_to_be_angle = measured;
            self.current_angle_available = true;
        }

        let to_be = self.trajectory.angle_at(now_ms)?;
        let next_ms = now_ms.saturating_add(self.constants.sample_period_ms);
        let to_be_next = self.trajectory.angle_at(next_ms).unwrap_or(to_be);

        let c = &self.constants;
        let feed_forward_steps = c.microsteps_by_angle((to_be - self.last_to_be_angle).value());
        let next_feed_forward_steps = c.microsteps_by_angle((to_be_next - to_be).value());
        let error_steps = c.microsteps_by_angle((to_be - measured).value());

        let pi = self.pi.update(error_steps, c.sample_period_secs);
        let travel_steps = pi.total() + feed_forward_steps;

        let raw_acceleration =
            (feed_forward_steps - next_feed_forward_steps + error_steps) * c.sample_frequency;
        let acceleration =
            limit_sample_acceleration(raw_acceleration, travel_steps, c.max_step_acceleration);

        let report = SampleReport {
            now_ms,
            to_be,
            last_to_be: self.last_to_be_angle,
            to_be_next,
            measured,
            feed_forward_steps,
            next_feed_forward_steps,
            error_steps,
            proportional: pi.proportional,
            integral: pi.integral,
            travel_steps,
            raw_acceleration,
            acceleration,
        };

        self.last_to_be_angle = to_be;
        Some(report)
    }

    /// Null the trajectory; later samples apply no correction.
    pub fn hold(&mut self) {
        self.trajectory.set_null();
    }

    /// Clear the integral accumulator.
    pub fn reset_integral(&mut self) {
        self.pi.reset();
    }

    /// Accumulated integral of the step error.
    #[inline]
    pub fn integral(&self) -> f32 {
        self.pi.integral()
    }

    /// Whether a measurement has arrived.
    #[inline]
    pub fn current_angle_available(&self) -> bool {
        self.current_angle_available
    }

    /// Setpoint of the previous sample.
    #[inline]
    pub fn last_to_be_angle(&self) -> Degrees {
        self.last_to_be_angle
    }

    /// Active trajectory.
    #[inline]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Constants in use.
    #[inline]
    pub fn constants(&self) -> &DriveConstants {
        &self.constants
    }
}
