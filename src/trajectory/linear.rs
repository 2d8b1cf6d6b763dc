//! Linear angle trajectory.

use crate::config::units::Degrees;

/// Active segment of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Segment {
    start_angle: Degrees,
    target_angle: Degrees,
    start_time_ms: u32,
    duration_ms: u32,
}

/// Linear interpolation from a start angle to a target angle over a duration.
///
/// A null trajectory means "hold, no active motion command" and has no
/// setpoint at all; [`Trajectory::angle_at`] returns `None` for it. That is
/// distinct from a zero-duration trajectory, which jumps to its target.
///
/// The trajectory is replaced wholesale by [`Trajectory::set`]. Once its end
/// time has passed it keeps reporting the target until replaced or nulled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Trajectory {
    segment: Option<Segment>,
}

impl Trajectory {
    /// Create a null trajectory.
    pub const fn null() -> Self {
        Self { segment: None }
    }

    /// Create a trajectory from `start` to `target` beginning at `now_ms`.
    pub fn linear(start: Degrees, target: Degrees, now_ms: u32, duration_ms: u32) -> Self {
        let mut trajectory = Self::null();
        trajectory.set(start, target, now_ms, duration_ms);
        trajectory
    }

    /// Replace the trajectory. No range checks happen here.
    pub fn set(&mut self, start: Degrees, target: Degrees, now_ms: u32, duration_ms: u32) {
        self.segment = Some(Segment {
            start_angle: start,
            target_angle: target,
            start_time_ms: now_ms,
            duration_ms,
        });
    }

    /// Drop the active motion command.
    pub fn set_null(&mut self) {
        self.segment = None;
    }

    /// Whether there is no active motion command.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.segment.is_none()
    }

    /// Angle the trajectory starts from, if any.
    pub fn start_angle(&self) -> Option<Degrees> {
        self.segment.map(|s| s.start_angle)
    }

    /// Angle the trajectory ends at, if any.
    pub fn target_angle(&self) -> Option<Degrees> {
        self.segment.map(|s| s.target_angle)
    }

    /// Time at which the trajectory reaches its target, if any.
    pub fn end_time_ms(&self) -> Option<u32> {
        self.segment
            .map(|s| s.start_time_ms.saturating_add(s.duration_ms))
    }

    /// Setpoint at time `t_ms`.
    ///
    /// Before the start time this is the start angle (never extrapolated
    /// backward), at or after the end time it is the target angle, and in
    /// between it is interpolated linearly. `None` for a null trajectory.
    pub fn angle_at(&self, t_ms: u32) -> Option<Degrees> {
        let s = self.segment?;

        if t_ms < s.start_time_ms {
            return Some(s.start_angle);
        }

        let elapsed = t_ms - s.start_time_ms;
        if elapsed >= s.duration_ms {
            return Some(s.target_angle);
        }

        let ratio = elapsed as f32 / s.duration_ms as f32;
        let span = s.target_angle.0 - s.start_angle.0;
        Some(Degrees(s.start_angle.0 + span * ratio))
    }
}
