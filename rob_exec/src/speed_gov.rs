//! # Speed governor
//!
//! Scalar rate limiter producing a forward speed that respects an
//! acceleration limit and can always stop within the remaining distance.
//!
//! Each call:
//! 1. starts from the requested maximum speed,
//! 2. limits the change from the previous output to `max_accel * dt`,
//! 3. bounds the magnitude by the braking speed `sqrt(2 * max_accel * d)`,
//! 4. raises the magnitude to the minimum speed floor, in the requested
//!    direction.
//!
//! With a non-zero floor the governor only outputs exactly zero when zero is
//! requested, callers decide for themselves when the target has been reached.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use util::maths::{limit_magnitude, sign};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Acceleration and braking distance limited speed governor.
#[derive(Debug, Clone)]
pub struct SpeedGovernor {
    /// Minimum output speed magnitude.
    ///
    /// Units: inches/second
    min_speed: f64,

    /// The previous output, `None` before the first call.
    prev: Option<GovernorSample>,
}

/// A single output of the governor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GovernorSample {
    /// Units: seconds
    time_s: f64,

    /// Units: inches/second
    speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SpeedGovernor {
    /// Create a new governor with the given minimum speed floor.
    pub fn new(min_speed: f64) -> Self {
        Self {
            min_speed: min_speed.abs(),
            prev: None,
        }
    }

    /// Forget the previous output, the next call will not be rate limited.
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Get the speed limit for this cycle.
    ///
    /// # Inputs
    /// - `time_s`: current time
    /// - `remaining_dist`: distance left to the target, negative values are
    ///   treated as zero
    /// - `max_speed`: unconstrained target speed, its sign gives the
    ///   direction of travel. A zero request is never raised to the floor.
    /// - `max_accel`: acceleration magnitude limit
    ///
    /// The first call, and any call where time has not advanced, applies no
    /// acceleration limiting.
    pub fn limit(
        &mut self,
        time_s: f64,
        remaining_dist: f64,
        max_speed: f64,
        max_accel: f64,
    ) -> f64 {
        let max_accel = max_accel.abs();
        let mut speed = max_speed;

        // Acceleration limits
        if let Some(prev) = self.prev {
            let dt = time_s - prev.time_s;
            if dt > 0.0 {
                let max_delta = max_accel * dt;
                speed = speed.max(prev.speed - max_delta).min(prev.speed + max_delta);
            }
        }

        // Braking distance limit, from vf^2 = v^2 - 2ad with vf = 0
        let max_braking_speed = (2.0 * max_accel * remaining_dist.max(0.0)).sqrt();
        speed = limit_magnitude(speed, max_braking_speed);

        // Minimum speed so the target can still be reached. The floor follows
        // the requested direction, so a reversal is not held inside the band.
        let direction = sign(max_speed);
        if direction != 0.0 && speed.abs() < self.min_speed {
            speed = direction * self.min_speed;
        }

        trace!(
            "SpeedGovernor: remaining {:.2} in, braking limit {:.2} in/s, output {:.2} in/s",
            remaining_dist,
            max_braking_speed,
            speed
        );

        self.prev = Some(GovernorSample { time_s, speed });

        speed
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const MAX_SPEED: f64 = 100.0;
    const MAX_ACCEL: f64 = 50.0;
    const MIN_SPEED: f64 = 6.0;

    #[test]
    fn test_first_call_unlimited() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        assert_eq!(gov.limit(12.0, 1000.0, MAX_SPEED, MAX_ACCEL), MAX_SPEED);
    }

    #[test]
    fn test_accel_limited() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        let dt = 0.02;

        // Seed at low speed, then ask for full speed every cycle
        let mut prev = gov.limit(0.0, 1000.0, 10.0, MAX_ACCEL);
        for i in 1..200 {
            let speed = gov.limit(i as f64 * dt, 1000.0, MAX_SPEED, MAX_ACCEL);
            assert!(
                (speed - prev).abs() <= MAX_ACCEL * dt + 1e-9,
                "step {}: {} -> {}",
                i,
                prev,
                speed
            );
            prev = speed;
        }

        // 200 cycles of 1 in/s each is enough to reach full speed
        assert!((prev - MAX_SPEED).abs() < 1e-9);

        // And back down symmetrically
        let speed = gov.limit(200.0 * dt, 1000.0, 0.0, MAX_ACCEL);
        assert!((speed - (MAX_SPEED - MAX_ACCEL * dt)).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_dt() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        gov.limit(1.0, 1000.0, 10.0, MAX_ACCEL);

        // Same timestamp, no limiting
        assert_eq!(gov.limit(1.0, 1000.0, MAX_SPEED, MAX_ACCEL), MAX_SPEED);

        // Time going backwards, no limiting
        assert_eq!(gov.limit(0.5, 1000.0, 20.0, MAX_ACCEL), 20.0);
    }

    #[test]
    fn test_braking_bound() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);

        for &dist in &[0.2, 0.5, 4.0, 16.0, 36.0, 64.0, 100.0, 1000.0] {
            gov.reset();
            let speed = gov.limit(0.0, dist, MAX_SPEED, MAX_ACCEL);
            let brake = (2.0 * MAX_ACCEL * dist).sqrt();

            if brake >= MIN_SPEED {
                assert!(speed <= brake + 1e-9, "dist {}: {} > {}", dist, speed, brake);
                assert!((speed - brake.min(MAX_SPEED)).abs() < 1e-9);
            } else {
                // Floor wins only when the braking bound is below it
                assert_eq!(speed, MIN_SPEED);
            }
        }
    }

    #[test]
    fn test_floor_at_target() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        assert_eq!(gov.limit(0.0, 0.0, MAX_SPEED, MAX_ACCEL), MIN_SPEED);

        // Past the target is treated as at the target
        assert_eq!(gov.limit(0.02, -10.0, MAX_SPEED, MAX_ACCEL), MIN_SPEED);

        // Zero floor allows a full stop
        let mut gov = SpeedGovernor::new(0.0);
        assert_eq!(gov.limit(0.0, 0.0, MAX_SPEED, MAX_ACCEL), 0.0);
    }

    #[test]
    fn test_reverse_preserves_sign() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        assert_eq!(gov.limit(0.0, 1000.0, -36.0, 36.0), -36.0);

        // Braking near the target keeps the reverse direction
        gov.reset();
        let speed = gov.limit(0.0, 2.0, -36.0, 36.0);
        assert!((speed + 12.0).abs() < 1e-9);

        // Floor keeps the reverse direction too
        gov.reset();
        assert_eq!(gov.limit(0.0, 0.0, -36.0, 36.0), -MIN_SPEED);
    }

    #[test]
    fn test_zero_request_not_floored() {
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        assert_eq!(gov.limit(0.0, 100.0, 0.0, MAX_ACCEL), 0.0);

        // Slowing to a stop from speed reaches zero rather than the floor
        gov.reset();
        let mut speed = gov.limit(0.0, 1000.0, 10.0, MAX_ACCEL);
        assert_eq!(speed, 10.0);
        for i in 1..50 {
            speed = gov.limit(i as f64 * 0.02, 1000.0, 0.0, MAX_ACCEL);
            assert!(speed >= 0.0);
        }
        assert_eq!(speed, 0.0);
    }

    #[test]
    fn test_reversal_from_floor() {
        let dt = 0.02;
        let mut gov = SpeedGovernor::new(MIN_SPEED);
        assert_eq!(gov.limit(0.0, 1000.0, MIN_SPEED, MAX_ACCEL), MIN_SPEED);

        // Asking for reverse crosses the floor band straight away
        let mut speed = gov.limit(dt, 1000.0, -36.0, MAX_ACCEL);
        assert_eq!(speed, -MIN_SPEED);

        for i in 2..100 {
            speed = gov.limit(i as f64 * dt, 1000.0, -36.0, MAX_ACCEL);
            assert!(speed <= -MIN_SPEED);
        }
        assert!((speed + 36.0).abs() < 1e-9);
    }
}
