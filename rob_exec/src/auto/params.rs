//! # Autonomous routine parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::PathOptions;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the autonomous routines.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoParams {
    /// Delay before the routine does anything, to let alliance partners go
    /// first.
    ///
    /// Units: seconds
    pub initial_delay_s: f64,

    /// Time given to the outtake to eject the preloaded cargo.
    ///
    /// Units: seconds
    pub shot_time_s: f64,

    /// Remaining path length below which a path is considered complete.
    ///
    /// Units: inches
    pub path_finished_threshold_in: f64,

    /// Speed reached at full throttle.
    ///
    /// Units: inches/second
    pub full_throttle_speed_ins: f64,

    /// Minimum path following speed.
    ///
    /// Units: inches/second
    pub min_speed_ins: f64,

    /// Distance driven backwards to leave the tarmac.
    ///
    /// Units: inches
    pub drive_off_dist_in: f64,

    /// Options used while driving off the tarmac.
    pub drive_off_options: PathOptions,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            initial_delay_s: 0.0,
            shot_time_s: 0.5,
            path_finished_threshold_in: 3.0,
            full_throttle_speed_ins: 100.0,
            min_speed_ins: 6.0,
            drive_off_dist_in: 120.0,
            drive_off_options: PathOptions::new(36.0, 36.0, 24.0),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
