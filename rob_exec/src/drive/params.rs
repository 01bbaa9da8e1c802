//! Parameters structure for the drive kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Physical drive geometry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct KinematicsParams {
    /// Distance between the centres of the left and right wheels.
    ///
    /// Units: inches
    pub track_width_in: f64,

    /// Effective track width multiplier accounting for wheel scrub while
    /// turning. Must be greater than zero.
    pub track_scrub_factor: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for KinematicsParams {
    fn default() -> Self {
        Self {
            track_width_in: 23.5,
            track_scrub_factor: 1.0,
        }
    }
}
