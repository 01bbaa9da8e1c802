//! Differential drive kinematics
//!
//! The single place where the physical drive geometry is used. Curvature is
//! positive for a left turn, matching the robot frame where Y points left.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{KinematicsParams, WheelSpeed};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Shortest lookahead used in the pure pursuit law, keeps the curvature
/// finite when the robot is on top of its target.
///
/// Units: inches
pub const MIN_LOOKAHEAD_IN: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Differential drive kinematics for a given track geometry.
#[derive(Debug, Clone, Copy)]
pub struct Kinematics {
    params: KinematicsParams,
}

/// Body motion of a differential drive robot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BodyMotion {
    /// Forward speed, in the same units as the wheel speeds.
    pub speed: f64,

    /// Angular rate, positive anticlockwise.
    ///
    /// Units: wheel speed units per inch (rad/s when the wheels are in
    /// inches/second)
    pub angular_rate: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Kinematics {
    pub fn new(params: KinematicsParams) -> Self {
        debug_assert!(params.track_width_in > 0.0 && params.track_scrub_factor > 0.0);
        Self { params }
    }

    pub fn params(&self) -> &KinematicsParams {
        &self.params
    }

    /// Wheel speeds which drive at `speed` along an arc of the given
    /// `curvature`.
    ///
    /// Units: `speed` in any linear unit (the wheel speeds come out in the
    /// same unit), `curvature` in 1/inches.
    pub fn inverse_from_speed_curvature(&self, speed: f64, curvature: f64) -> WheelSpeed {
        let delta = self.params.track_width_in * speed * curvature
            / (2.0 * self.params.track_scrub_factor);

        WheelSpeed::new(speed - delta, speed + delta)
    }

    /// Body motion produced by the given wheel speeds.
    pub fn forward(&self, wheel_speed: WheelSpeed) -> BodyMotion {
        BodyMotion {
            speed: 0.5 * (wheel_speed.left + wheel_speed.right),
            angular_rate: (wheel_speed.right - wheel_speed.left) * self.params.track_scrub_factor
                / self.params.track_width_in,
        }
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new(KinematicsParams::default())
    }
}

impl BodyMotion {
    /// Curvature of the path being driven, or `None` when not moving.
    pub fn curvature(&self) -> Option<f64> {
        if self.speed == 0.0 {
            None
        } else {
            Some(self.angular_rate / self.speed)
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Curvature of the constant curvature arc from the robot to a point at the
/// given bearing, with the chord of length `lookahead_in`.
///
/// Positive bearings (point on the left) give positive curvatures.
pub fn pursuit_curvature(bearing_rad: f64, lookahead_in: f64) -> f64 {
    2.0 * bearing_rad.sin() / lookahead_in.max(MIN_LOOKAHEAD_IN)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
