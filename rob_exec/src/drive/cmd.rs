//! Drive command definitions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A pair of left and right wheel speeds.
///
/// Units: either inches/second or a normalised power in `[-1, 1]`, depending
/// on what was passed into the kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelSpeed {
    pub left: f64,
    pub right: f64,
}

/// Left and right motor power demands.
///
/// Both sides are always kept within `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    left: f64,
    right: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WheelSpeed {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

impl DriveCommand {
    /// Create a new command, clamping each side into `[-1, 1]`.
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            left: clamp(left, -1.0, 1.0),
            right: clamp(right, -1.0, 1.0),
        }
    }

    /// A command with both motors off.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Build a command from arcade-style joystick axes.
    ///
    /// Positive `throttle` drives forwards, positive `turn` speeds up the
    /// right side and so turns the robot left.
    pub fn from_arcade(turn: f64, throttle: f64) -> Self {
        Self::new(throttle - turn, throttle + turn)
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    /// Forward speed of the command, the mean of both sides.
    pub fn speed(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Overwrite the motor powers with the given wheel speeds.
    pub fn set_motors(&mut self, wheel_speed: WheelSpeed) {
        *self = Self::new(wheel_speed.left, wheel_speed.right);
    }

    pub fn is_neutral(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }
}

impl From<WheelSpeed> for DriveCommand {
    fn from(ws: WheelSpeed) -> Self {
        Self::new(ws.left, ws.right)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
