//! # Path follower
//!
//! Follows a [`Path`] with the constant curvature pure pursuit law. Each
//! tick the robot steers onto the point one lookahead distance further
//! along the path than its closest point, at a speed limited by a
//! [`SpeedGovernor`] so it can always stop at the end of the path.
//!
//! Reverse paths are followed by steering the rear of the robot, the speed
//! and curvature are then negated into the robot frame.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{info, trace};
use serde::Serialize;

use super::{Action, ActionCtx, AutoParams, Path};
use crate::{
    drive::{pursuit_curvature, DriveCommand, Kinematics},
    speed_gov::SpeedGovernor,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Action driving the robot along a path.
#[derive(Debug)]
pub struct PathFollowerAction {
    path: Path,
    kinematics: Kinematics,
    governor: SpeedGovernor,

    /// Units: inches/second
    full_throttle_speed_ins: f64,

    /// Units: inches
    finished_threshold_in: f64,

    report: PathFollowerReport,
}

/// Internal values of the path follower on the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PathFollowerReport {
    /// Units: seconds
    pub time_s: f64,

    /// Units: inches
    pub remaining_in: f64,

    /// Units: inches
    pub cross_track_in: f64,

    /// Bearing of the lookahead point from the driving direction.
    ///
    /// Units: radians
    pub bearing_rad: f64,

    /// Units: 1/inches
    pub curvature: f64,

    /// Forward speed as a throttle fraction, negative when reversing.
    pub speed: f64,

    pub left_wheel_speed: f64,
    pub right_wheel_speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathFollowerAction {
    pub fn new(path: Path, kinematics: Kinematics, params: &AutoParams) -> Self {
        Self {
            path,
            kinematics,
            governor: SpeedGovernor::new(params.min_speed_ins),
            full_throttle_speed_ins: params.full_throttle_speed_ins,
            finished_threshold_in: params.path_finished_threshold_in,
            report: PathFollowerReport::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn report(&self) -> &PathFollowerReport {
        &self.report
    }
}

impl Action for PathFollowerAction {
    fn start(&mut self, ctx: &mut ActionCtx<'_>) {
        self.governor.reset();
        info!(
            "Following {} path of {:.1} in from ({:.1}, {:.1})",
            if self.path.is_reverse() { "reverse" } else { "forward" },
            self.path.length(),
            ctx.pose.position.x(),
            ctx.pose.position.y()
        );
    }

    fn run(&mut self, ctx: &mut ActionCtx<'_>) {
        let progress = self.path.progress(ctx.pose.position);
        let options = self.path.options(progress.segment);

        let lookahead_point = self
            .path
            .point_at(progress.distance_along_in + options.lookahead_in);

        // Steer the end of the robot facing the direction of travel
        let driving_pose = if self.path.is_reverse() {
            ctx.pose.reversed()
        } else {
            ctx.pose
        };
        let local = driving_pose.to_local(lookahead_point);
        let bearing = local.angle();
        let mut curvature = pursuit_curvature(bearing, local.length());

        let speed_ins = self.governor.limit(
            ctx.time_s,
            progress.remaining_in,
            options.max_speed_ins,
            options.accel_ins2,
        );
        let mut speed = speed_ins / self.full_throttle_speed_ins;

        if self.path.is_reverse() {
            speed = -speed;
            curvature = -curvature;
        }

        let wheel_speed = self.kinematics.inverse_from_speed_curvature(speed, curvature);
        ctx.drivetrain.set_drive_cmd(DriveCommand::from(wheel_speed));

        self.report = PathFollowerReport {
            time_s: ctx.time_s,
            remaining_in: progress.remaining_in,
            cross_track_in: progress.cross_track_in,
            bearing_rad: bearing,
            curvature,
            speed,
            left_wheel_speed: wheel_speed.left,
            right_wheel_speed: wheel_speed.right,
        };

        trace!("PathFollower: {:?}", self.report);
    }

    fn is_finished(&self, ctx: &ActionCtx<'_>) -> bool {
        self.path.progress(ctx.pose.position).remaining_in < self.finished_threshold_in
    }

    fn done(&mut self, ctx: &mut ActionCtx<'_>) {
        ctx.drivetrain.stop();
        info!(
            "Path finished at ({:.1}, {:.1})",
            ctx.pose.position.x(),
            ctx.pose.position.y()
        );
    }

    fn name(&self) -> String {
        format!(
            "PathFollower({}{:.0} in)",
            if self.path.is_reverse() { "-" } else { "" },
            self.path.length()
        )
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
