//! Parameters structure for the robot executable

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Executable level parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RobExecParams {
    // ---- CYCLE ----
    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Default length of the autonomous period.
    ///
    /// Units: seconds
    pub auto_period_s: f64,

    /// Default length of the teleoperated period.
    ///
    /// Units: seconds
    pub teleop_period_s: f64,

    // ---- SIMULATION ----
    /// Speed of the simulated robot at full throttle.
    ///
    /// Units: inches/second
    pub sim_full_throttle_speed_ins: f64,

    /// Field frame position of the simulated vision target.
    ///
    /// Units: inches
    pub sim_target_pos_in: [f64; 2],

    /// Horizontal field of view of the simulated camera.
    ///
    /// Units: degrees
    pub sim_camera_fov_deg: f64,

    /// Maximum range at which the simulated camera sees the target.
    ///
    /// Units: inches
    pub sim_camera_range_in: f64,

    // ---- TELEOP ----
    /// Throttle held by the simulated driver during teleop.
    pub teleop_throttle: f64,

    /// Turn held by the simulated driver during teleop.
    pub teleop_turn: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RobExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            auto_period_s: 15.0,
            teleop_period_s: 10.0,
            sim_full_throttle_speed_ins: 100.0,
            sim_target_pos_in: [60.0, 30.0],
            sim_camera_fov_deg: 60.0,
            sim_camera_range_in: 300.0,
            teleop_throttle: 0.5,
            teleop_turn: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
