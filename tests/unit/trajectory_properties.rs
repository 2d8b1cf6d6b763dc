//! Property tests for trajectories and limit clamping.

use proptest::prelude::*;

use geared_stepper::config::AngleLimits;
use geared_stepper::{Degrees, Trajectory};

proptest! {
    #[test]
    fn angle_stays_between_endpoints(
        start in -180.0f32..180.0,
        target in -180.0f32..180.0,
        t0 in 0u32..1_000_000,
        duration in 1u32..60_000,
        offset in 0u32..60_000,
    ) {
        let trajectory = Trajectory::linear(Degrees(start), Degrees(target), t0, duration);
        let angle = trajectory.angle_at(t0 + offset.min(duration)).unwrap().value();

        let lo = start.min(target) - 1e-3;
        let hi = start.max(target) + 1e-3;
        prop_assert!(angle >= lo && angle <= hi, "{} not in [{}, {}]", angle, lo, hi);
    }

    #[test]
    fn angle_is_monotonic_in_time(
        start in -180.0f32..180.0,
        target in -180.0f32..180.0,
        duration in 1u32..10_000,
        a in 0u32..12_000,
        b in 0u32..12_000,
    ) {
        let trajectory = Trajectory::linear(Degrees(start), Degrees(target), 1_000, duration);
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let first = trajectory.angle_at(early).unwrap().value();
        let second = trajectory.angle_at(late).unwrap().value();

        if target >= start {
            prop_assert!(second >= first - 1e-3);
        } else {
            prop_assert!(second <= first + 1e-3);
        }
    }

    #[test]
    fn endpoints_are_exact(
        start in -180.0f32..180.0,
        target in -180.0f32..180.0,
        t0 in 0u32..1_000_000,
        duration in 0u32..60_000,
    ) {
        let trajectory = Trajectory::linear(Degrees(start), Degrees(target), t0, duration);

        if duration > 0 {
            prop_assert_eq!(trajectory.angle_at(t0), Some(Degrees(start)));
        }
        prop_assert_eq!(trajectory.angle_at(t0 + duration), Some(Degrees(target)));
    }

    #[test]
    fn clamp_is_idempotent(
        min in -180.0f32..0.0,
        span in 1.0f32..180.0,
        angle in -1000.0f32..1000.0,
    ) {
        let limits = AngleLimits::new(Degrees(min), Degrees(min + span));
        let once = limits.clamp(Degrees(angle));

        prop_assert_eq!(limits.clamp(once), once);
        prop_assert!(limits.contains(once));
    }
}
