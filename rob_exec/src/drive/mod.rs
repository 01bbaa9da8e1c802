//! # Drive module
//!
//! Differential drive commands, the kinematics relating forward speed and
//! path curvature to left/right wheel speeds, and the interface to whatever
//! actually drives the wheels.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod kinematics;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use cmd::*;
pub use kinematics::*;
pub use params::*;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A drivetrain able to execute drive commands.
///
/// Implemented by the motor driver on the robot and by the simulated
/// drivetrain on the host.
pub trait Drivetrain {
    /// Command the given motor powers.
    fn set_drive_cmd(&mut self, cmd: DriveCommand);

    /// Stop all drive motors.
    fn stop(&mut self) {
        self.set_drive_cmd(DriveCommand::neutral())
    }
}
