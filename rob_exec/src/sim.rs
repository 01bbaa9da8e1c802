//! # Simulated collaborators
//!
//! Stand-ins for the robot hardware used by the host executable and the
//! tests: a drivetrain which integrates its pose from the commanded wheel
//! powers, an intake arm slewing toward its target position, and a camera
//! which sees a single fixed target within its field of view.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;

use crate::{
    drive::{DriveCommand, Drivetrain, Kinematics, WheelSpeed},
    geom::{Pose, Vector2d},
    subsystems::{ArmTarget, IntakeCtrl, IntakeState},
    vision::{GoalState, GoalStates},
};
use util::maths::wrap_pi;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Rate at which the simulated intake arm moves.
///
/// Units: degrees/second
pub const SIM_ARM_RATE_DEGS: f64 = 240.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulated differential drivetrain.
#[derive(Debug, Clone)]
pub struct SimDrivetrain {
    kinematics: Kinematics,

    /// Units: inches/second
    full_throttle_speed_ins: f64,

    pose: Pose,
    cmd: DriveCommand,
}

/// Simulated intake.
#[derive(Debug, Clone)]
pub struct SimIntake {
    state: IntakeState,

    /// Units: degrees
    arm_angle_deg: f64,

    roller_demand: f64,
}

/// Simulated camera looking out of the front of the robot.
#[derive(Debug, Clone)]
pub struct SimCamera {
    /// Field frame position of the target.
    target: Vector2d,

    /// Half the horizontal field of view.
    ///
    /// Units: radians
    half_fov_rad: f64,

    /// Units: inches
    max_range_in: f64,
}

/// State of the simulation for archiving.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimReport {
    pub time_s: f64,
    pub x_in: f64,
    pub y_in: f64,
    pub heading_rad: f64,
    pub left_cmd: f64,
    pub right_cmd: f64,
    pub arm_angle_deg: f64,
    pub roller_demand: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimDrivetrain {
    pub fn new(kinematics: Kinematics, full_throttle_speed_ins: f64, initial_pose: Pose) -> Self {
        Self {
            kinematics,
            full_throttle_speed_ins,
            pose: initial_pose,
            cmd: DriveCommand::neutral(),
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn cmd(&self) -> DriveCommand {
        self.cmd
    }

    /// Place the robot at a new pose.
    pub fn reset_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Integrate the pose over one time step with the current command.
    pub fn step(&mut self, dt_s: f64) {
        let ws = WheelSpeed::new(
            self.cmd.left() * self.full_throttle_speed_ins,
            self.cmd.right() * self.full_throttle_speed_ins,
        );
        let motion = self.kinematics.forward(ws);

        let dh = motion.angular_rate * dt_s;
        let mid_heading = self.pose.heading_rad + 0.5 * dh;

        self.pose = Pose {
            position: self.pose.position + Vector2d::from_angle(mid_heading) * (motion.speed * dt_s),
            heading_rad: wrap_pi(self.pose.heading_rad + dh),
        };
    }
}

impl Drivetrain for SimDrivetrain {
    fn set_drive_cmd(&mut self, cmd: DriveCommand) {
        self.cmd = cmd;
    }
}

impl SimIntake {
    /// A new intake in defense with the arm raised.
    pub fn new() -> Self {
        Self {
            state: IntakeState::Defense,
            arm_angle_deg: crate::subsystems::ArmPos::Raised.angle_deg(),
            roller_demand: 0.0,
        }
    }

    pub fn roller_demand(&self) -> f64 {
        self.roller_demand
    }

    /// Move the arm toward its target over one time step.
    pub fn step(&mut self, dt_s: f64) {
        if let ArmTarget::Fixed(pos) = self.state.arm_target() {
            let err = pos.angle_deg() - self.arm_angle_deg;
            let max_step = SIM_ARM_RATE_DEGS * dt_s;
            self.arm_angle_deg += err.max(-max_step).min(max_step);
        }

        self.roller_demand = self.state.roller_demand(self.arm_angle_deg);
    }
}

impl Default for SimIntake {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeCtrl for SimIntake {
    fn set_state(&mut self, state: IntakeState) {
        if state != self.state {
            debug!("SimIntake: {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    fn state(&self) -> IntakeState {
        self.state
    }

    fn arm_angle_deg(&self) -> f64 {
        self.arm_angle_deg
    }
}

impl SimCamera {
    pub fn new(target: Vector2d, fov_rad: f64, max_range_in: f64) -> Self {
        Self {
            target,
            half_fov_rad: 0.5 * fov_rad.abs(),
            max_range_in,
        }
    }

    /// Targets visible from the given pose. Confidence falls off with range.
    pub fn observe(&self, pose: &Pose) -> GoalStates {
        let mut goals = GoalStates::new();

        let local = pose.to_local(self.target);
        let range = local.length();

        if local.x() > 0.0 && local.angle().abs() <= self.half_fov_rad && range <= self.max_range_in {
            goals.update(Some(GoalState::new(self.target, 1.0 - range / self.max_range_in)));
        }

        goals
    }
}

impl SimReport {
    pub fn new(time_s: f64, drive: &SimDrivetrain, intake: &SimIntake) -> Self {
        let pose = drive.pose();
        Self {
            time_s,
            x_in: pose.position.x(),
            y_in: pose.position.y(),
            heading_rad: pose.heading_rad,
            left_cmd: drive.cmd().left(),
            right_cmd: drive.cmd().right(),
            arm_angle_deg: intake.arm_angle_deg(),
            roller_demand: intake.roller_demand(),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive::KinematicsParams;
    use crate::subsystems::ArmPos;
    use crate::vision::GoalSource;

    #[test]
    fn test_drive_straight_and_turn() {
        let kin = Kinematics::new(KinematicsParams {
            track_width_in: 20.0,
            track_scrub_factor: 1.0,
        });
        let mut sim = SimDrivetrain::new(kin, 100.0, Pose::default());

        sim.set_drive_cmd(DriveCommand::new(0.5, 0.5));
        for _ in 0..50 {
            sim.step(0.02);
        }
        assert!((sim.pose().position.x() - 50.0).abs() < 1e-9);
        assert!(sim.pose().position.y().abs() < 1e-9);

        // Spin on the spot anticlockwise, 10 in/s per side on a 20 in track
        // is 1 rad/s
        sim.reset_pose(Pose::default());
        sim.set_drive_cmd(DriveCommand::new(-0.1, 0.1));
        for _ in 0..50 {
            sim.step(0.02);
        }
        assert!(sim.pose().position.length() < 1e-9);
        assert!((sim.pose().heading_rad - 1.0).abs() < 1e-9);

        sim.stop();
        assert!(sim.cmd().is_neutral());
    }

    #[test]
    fn test_intake_arm() {
        let mut intake = SimIntake::new();
        assert!(intake.is_at_pos(ArmPos::Raised, 1.0));

        intake.set_state(IntakeState::Intake);
        intake.step(0.02);
        assert!(!intake.is_at_pos(ArmPos::Lowered, 5.0));
        assert_eq!(intake.roller_demand(), 0.0);

        for _ in 0..50 {
            intake.step(0.02);
        }
        assert!(intake.is_at_pos(ArmPos::Lowered, 0.1));
        assert!(intake.roller_demand() > 0.0);

        // Climbing leaves the arm where it is
        intake.set_state(IntakeState::Climbing);
        intake.step(0.02);
        assert!(intake.is_at_pos(ArmPos::Lowered, 0.1));
    }

    #[test]
    fn test_camera() {
        let cam = SimCamera::new(Vector2d::new(100.0, 0.0), 60f64.to_radians(), 200.0);

        let goals = cam.observe(&Pose::default());
        let best = goals.best_vision_target().unwrap();
        assert_eq!(best.position, Vector2d::new(100.0, 0.0));
        assert!((best.confidence - 0.5).abs() < 1e-9);

        // Outside the field of view
        let goals = cam.observe(&Pose::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
        assert!(goals.best_vision_target().is_none());

        // Out of range
        let goals = cam.observe(&Pose::new(-150.0, 0.0, 0.0));
        assert!(goals.best_vision_target().is_none());
    }
}
