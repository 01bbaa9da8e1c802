//! Vision drive assistant
//!
//! Tracks the best vision target and, while the driver holds the assist
//! control, replaces the driver's steering with a constant curvature pure
//! pursuit arc onto the target. The driver keeps control of forward speed,
//! optionally limited so the robot can always stop in front of the target.
//!
//! Goal tracking:
//!
//! | goal held | target seen | assist held | result                      |
//! |-----------|-------------|-------------|-----------------------------|
//! | any       | yes         | any         | goal = latest observation   |
//! | yes       | no          | yes         | keep the last known goal    |
//! | any       | no          | no          | goal forgotten              |

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace};
use serde::Serialize;

// Internal
use super::{GoalSource, GoalState, Params, VisionAssistError};
use crate::{
    drive::{pursuit_curvature, DriveCommand, Kinematics, MIN_LOOKAHEAD_IN},
    geom::{Pose, Vector2d},
    speed_gov::SpeedGovernor,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    diag::{DiagSink, DiagSource},
    maths::limit_magnitude,
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Goal coordinate reported to diagnostics when there is no goal.
pub const NO_GOAL_DIAG_VALUE: f64 = -999.0;

/// Prefix of every diagnostics key published by the assistant.
const DIAG_PREFIX: &str = "VisionDriveAssist";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Vision drive assistant state.
pub struct VisionDriveAssistant {
    params: Params,
    kinematics: Kinematics,
    governor: SpeedGovernor,

    /// The goal currently being pursued, in the field frame.
    current_goal: Option<Vector2d>,

    report: AssistReport,
    arch_report: Archiver,
}

/// Input to one assist tick.
#[derive(Debug, Clone, Copy)]
pub struct AssistInput {
    /// Units: seconds
    pub time_s: f64,

    /// Current robot pose in the field frame.
    pub pose: Pose,

    /// Best target seen this tick.
    pub target: Option<GoalState>,

    /// The driver's drive command.
    pub drive_cmd: DriveCommand,

    /// True while the driver holds the assist control.
    pub enabled: bool,
}

/// Snapshot of the assistant's internal values for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AssistReport {
    /// Units: seconds
    pub time_s: f64,

    pub enabled: bool,
    pub have_goal: bool,

    /// Distance from the front of the intake to the target.
    ///
    /// Units: inches
    pub distance_to_target_in: f64,

    /// Bearing of the target from the robot heading, positive to the left.
    ///
    /// Units: radians
    pub bearing_to_target_rad: f64,

    /// Units: inches
    pub lookahead_dist_in: f64,

    /// Units: 1/inches
    pub curvature: f64,

    /// Forward speed requested by the driver, as a throttle fraction.
    pub joystick_speed: f64,

    /// Forward speed actually used, as a throttle fraction.
    pub approach_speed: f64,

    /// Speed limit from the distance to the target, as a throttle fraction.
    pub max_speed: f64,

    pub left_wheel_speed: f64,
    pub right_wheel_speed: f64,

    /// Field frame goal position, empty when there is no goal.
    ///
    /// Units: inches
    pub goal_x_in: Option<f64>,
    pub goal_y_in: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VisionDriveAssistant {
    pub fn new(params: Params, kinematics: Kinematics) -> Self {
        let governor = SpeedGovernor::new(params.min_speed_ins);
        let report = AssistReport {
            lookahead_dist_in: params.lookahead_dist_in,
            ..Default::default()
        };

        Self {
            params,
            kinematics,
            governor,
            current_goal: None,
            report,
            arch_report: Archiver::default(),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The goal currently being pursued, in the field frame.
    pub fn current_goal(&self) -> Option<Vector2d> {
        self.current_goal
    }

    pub fn have_goal(&self) -> bool {
        self.current_goal.is_some()
    }

    /// The report from the most recent tick.
    pub fn report(&self) -> &AssistReport {
        &self.report
    }

    /// Run one assist tick, querying the goal source for the best target.
    pub fn update(
        &mut self,
        time_s: f64,
        pose: &Pose,
        goals: &dyn GoalSource,
        drive_cmd: DriveCommand,
        enabled: bool,
    ) -> DriveCommand {
        let target = goals.best_vision_target();
        self.assist(time_s, pose, target, drive_cmd, enabled)
    }

    /// Run one assist tick.
    ///
    /// Returns the driver's command unchanged unless there is a goal and
    /// `enabled` is set, in which case the motor powers are replaced by the
    /// pursuit arc. The goal is tracked even when not enabled so that the
    /// assist acts immediately once the driver presses the control.
    pub fn assist(
        &mut self,
        time_s: f64,
        pose: &Pose,
        target: Option<GoalState>,
        drive_cmd: DriveCommand,
        enabled: bool,
    ) -> DriveCommand {
        let mut drive_cmd = drive_cmd;

        self.update_goal(target, enabled);

        let joystick_speed = drive_cmd.speed();

        let mut report = AssistReport {
            time_s,
            enabled,
            have_goal: self.current_goal.is_some(),
            joystick_speed,
            approach_speed: joystick_speed,
            lookahead_dist_in: self.params.lookahead_dist_in,
            ..Default::default()
        };

        if let Some(goal) = self.current_goal {
            // Range and bearing in the robot frame
            let robot_to_goal = pose.to_local(goal);
            let distance_to_goal = robot_to_goal.length();
            let bearing = robot_to_goal.angle();

            let distance_to_target = distance_to_goal - self.params.center_to_intake_in;

            // Constant curvature arc onto the target, the chord no longer
            // than the lookahead distance
            let lookahead = self
                .params
                .lookahead_dist_in
                .min(distance_to_target.max(MIN_LOOKAHEAD_IN));
            let mut curvature = pursuit_curvature(bearing, lookahead);

            // Speed limit from the distance left, as a throttle fraction
            let remaining = distance_to_target.max(0.0);
            let max_speed_ins = self.governor.limit(
                time_s,
                remaining,
                self.params.max_speed_ins,
                self.params.max_accel_ins2,
            );
            let max_speed = (max_speed_ins / self.params.full_throttle_speed_ins)
                .max(self.params.min_throttle_frac);

            let mut approach_speed = joystick_speed;
            if self.params.allow_speed_control {
                approach_speed = limit_magnitude(approach_speed, max_speed);
            }

            // Keep on target when backing up
            if approach_speed < 0.0 {
                curvature = -curvature;
            }

            let wheel_speed = self
                .kinematics
                .inverse_from_speed_curvature(approach_speed, curvature);

            if enabled {
                drive_cmd.set_motors(wheel_speed);
            }

            report.distance_to_target_in = distance_to_target;
            report.bearing_to_target_rad = bearing;
            report.lookahead_dist_in = lookahead;
            report.curvature = curvature;
            report.approach_speed = approach_speed;
            report.max_speed = max_speed;
            report.left_wheel_speed = wheel_speed.left;
            report.right_wheel_speed = wheel_speed.right;
            report.goal_x_in = Some(goal.x());
            report.goal_y_in = Some(goal.y());

            trace!(
                "VisionDriveAssist: dist {:.1} in, bearing {:.3} rad, curv {:.4}, speed {:.2}",
                distance_to_target,
                bearing,
                curvature,
                approach_speed
            );
        }

        self.report = report;

        drive_cmd
    }

    fn update_goal(&mut self, target: Option<GoalState>, enabled: bool) {
        let had_goal = self.current_goal.is_some();

        match target {
            Some(t) => self.current_goal = Some(t.position),
            None if !enabled => self.current_goal = None,
            // Target not seen but assist still held, keep the last goal
            None => (),
        }

        match (had_goal, self.current_goal) {
            (false, Some(g)) => {
                info!("VisionDriveAssist: goal acquired at ({:.1}, {:.1})", g.x(), g.y())
            }
            (true, None) => {
                info!("VisionDriveAssist: goal lost");
                self.governor.reset();
            }
            _ => (),
        }
    }
}

impl Default for VisionDriveAssistant {
    fn default() -> Self {
        Self::new(Params::default(), Kinematics::default())
    }
}

impl State for VisionDriveAssistant {
    type InitData = &'static str;
    type InitError = VisionAssistError;

    type InputData = AssistInput;
    type OutputData = DriveCommand;
    type StatusReport = AssistReport;
    type ProcError = VisionAssistError;

    /// Initialise the assistant.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        let params: Params = params::load(init_data).map_err(VisionAssistError::ParamLoadError)?;

        // Rebuild around the new parameters, the goal and governor state are
        // not carried over
        *self = Self::new(params, self.kinematics);

        self.arch_report = Archiver::from_path(session, "vision_assist/report.csv")
            .map_err(VisionAssistError::ArchiveError)?;

        Ok(())
    }

    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let cmd = self.assist(
            input_data.time_s,
            &input_data.pose,
            input_data.target,
            input_data.drive_cmd,
            input_data.enabled,
        );

        Ok((cmd, self.report))
    }
}

impl Archived for VisionDriveAssistant {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)
    }
}

impl DiagSource for VisionDriveAssistant {
    fn log(&self, sink: &mut dyn DiagSink) {
        let r = &self.report;
        let key = |name: &str| format!("{}/{}", DIAG_PREFIX, name);

        sink.put_bool(&key("enabled"), r.enabled);
        sink.put_bool(&key("foundTarget"), r.have_goal);
        sink.put_f64(&key("centerToIntakeInches"), self.params.center_to_intake_in);
        sink.put_f64(&key("distanceToTargetInches"), r.distance_to_target_in);
        sink.put_f64(&key("bearingToTarget"), r.bearing_to_target_rad);
        sink.put_f64(&key("lookaheadDist"), r.lookahead_dist_in);
        sink.put_f64(&key("curvature"), r.curvature);
        sink.put_f64(&key("joystickSpeed"), r.joystick_speed);
        sink.put_f64(&key("approachSpeed"), r.approach_speed);
        sink.put_f64(&key("maxSpeed"), r.max_speed);
        sink.put_f64(&key("leftWheelSpeed"), r.left_wheel_speed);
        sink.put_f64(&key("rightWheelSpeed"), r.right_wheel_speed);
        sink.put_f64(
            &key("currentGoal/X"),
            r.goal_x_in.unwrap_or(NO_GOAL_DIAG_VALUE),
        );
        sink.put_f64(
            &key("currentGoal/Y"),
            r.goal_y_in.unwrap_or(NO_GOAL_DIAG_VALUE),
        );
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive::KinematicsParams;
    use crate::vision::GoalStates;
    use util::diag::DiagTable;

    const DT: f64 = 0.02;

    fn assistant(allow_speed_control: bool) -> VisionDriveAssistant {
        VisionDriveAssistant::new(
            Params {
                allow_speed_control,
                center_to_intake_in: 0.0,
                ..Default::default()
            },
            Kinematics::new(KinematicsParams {
                track_width_in: 24.0,
                track_scrub_factor: 1.0,
            }),
        )
    }

    fn target(x: f64, y: f64) -> Option<GoalState> {
        Some(GoalState::new(Vector2d::new(x, y), 1.0))
    }

    #[test]
    fn test_no_goal_passes_through() {
        let mut va = assistant(true);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.3, 0.6);

        let out = va.assist(0.0, &pose, None, cmd, true);
        assert_eq!(out, cmd);
        assert!(!va.have_goal());

        let r = va.report();
        assert!(!r.have_goal);
        assert_eq!(r.distance_to_target_in, 0.0);
        assert_eq!(r.bearing_to_target_rad, 0.0);
        assert_eq!(r.curvature, 0.0);
        assert_eq!(r.max_speed, 0.0);
        assert_eq!(r.lookahead_dist_in, 48.0);
        assert!((r.joystick_speed - 0.45).abs() < 1e-12);
        assert_eq!(r.approach_speed, r.joystick_speed);
    }

    #[test]
    fn test_straight_ahead_no_speed_control() {
        let mut va = assistant(false);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.5, 0.5);

        let out = va.assist(0.0, &pose, target(60.0, 0.0), cmd, true);

        let r = va.report();
        assert!(r.have_goal);
        assert_eq!(r.curvature, 0.0);
        assert_eq!(r.lookahead_dist_in, 48.0);
        assert_eq!(r.approach_speed, 0.5);
        assert_eq!(out, DriveCommand::new(0.5, 0.5));
    }

    #[test]
    fn test_turns_toward_target() {
        let mut va = assistant(false);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.5, 0.5);

        // Target ahead and to the left, right wheel must be faster
        let out = va.assist(0.0, &pose, target(60.0, 30.0), cmd, true);
        let r = *va.report();
        assert!(r.bearing_to_target_rad > 0.0);
        assert!(r.curvature > 0.0);
        assert!(out.right() > out.left());

        let expected_curv = 2.0 * r.bearing_to_target_rad.sin() / 48.0;
        assert!((r.curvature - expected_curv).abs() < 1e-12);

        // Same target while reversing, curvature flips so the robot still
        // backs toward the target
        let out = va.assist(DT, &pose, target(60.0, 30.0), DriveCommand::new(-0.5, -0.5), true);
        let r = *va.report();
        assert!((r.curvature + expected_curv).abs() < 1e-12);
        assert!(out.left() < 0.0 && out.right() < 0.0);
        assert!(out.right().abs() < out.left().abs());
    }

    #[test]
    fn test_goal_in_field_frame() {
        let mut va = assistant(false);

        // Robot facing north (+Y), target due north of it
        let pose = Pose::new(10.0, 10.0, std::f64::consts::FRAC_PI_2);
        va.assist(0.0, &pose, target(10.0, 110.0), DriveCommand::new(0.4, 0.4), true);

        let r = va.report();
        assert!(r.bearing_to_target_rad.abs() < 1e-9);
        assert!((r.distance_to_target_in - 100.0).abs() < 1e-9);
        assert_eq!(r.goal_x_in, Some(10.0));
        assert_eq!(r.goal_y_in, Some(110.0));
    }

    #[test]
    fn test_goal_held_while_enabled() {
        let mut va = assistant(false);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.5, 0.5);

        va.assist(0.0, &pose, target(80.0, 20.0), cmd, true);
        let goal = va.current_goal();
        assert!(goal.is_some());

        // Target occluded while still enabled, goal does not move
        for i in 1..50 {
            va.assist(i as f64 * DT, &pose, None, cmd, true);
            assert_eq!(va.current_goal(), goal);
        }

        // New observation replaces the goal
        va.assist(1.0, &pose, target(90.0, -10.0), cmd, true);
        assert_eq!(va.current_goal(), Some(Vector2d::new(90.0, -10.0)));

        // Released with nothing seen, goal forgotten
        va.assist(1.02, &pose, None, cmd, false);
        assert_eq!(va.current_goal(), None);
    }

    #[test]
    fn test_target_lost_resets_diagnostics() {
        let mut va = assistant(true);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.5, 0.5);

        va.assist(0.0, &pose, target(60.0, 20.0), cmd, false);
        assert!(va.report().curvature != 0.0);

        va.assist(DT, &pose, None, cmd, false);
        let r = va.report();
        assert!(!r.have_goal);
        assert_eq!(r.distance_to_target_in, 0.0);
        assert_eq!(r.bearing_to_target_rad, 0.0);
        assert_eq!(r.curvature, 0.0);
        assert_eq!(r.lookahead_dist_in, va.params().lookahead_dist_in);
        assert_eq!(r.goal_x_in, None);
    }

    #[test]
    fn test_disabled_tracks_without_steering() {
        let mut va = assistant(false);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.2, 0.7);

        let out = va.assist(0.0, &pose, target(60.0, -40.0), cmd, false);
        assert_eq!(out, cmd);
        assert!(va.have_goal());
        assert!(va.report().curvature < 0.0);
    }

    #[test]
    fn test_speed_control_floor_at_target() {
        let mut va = assistant(true);
        let pose = Pose::default();
        let cmd = DriveCommand::new(0.5, 0.5);

        // Target right at the intake, the speed limit sits on the floor
        let out = va.assist(0.0, &pose, target(0.0, 0.0), cmd, true);
        let r = va.report();
        assert_eq!(r.max_speed, va.params().min_throttle_frac);
        assert_eq!(r.approach_speed, va.params().min_throttle_frac);
        assert!((out.speed() - 0.2).abs() < 1e-12);
        assert!(r.curvature.is_finite());

        // Reversing keeps its sign under the limit
        va.assist(DT, &pose, target(0.0, 0.0), DriveCommand::new(-0.5, -0.5), true);
        assert_eq!(va.report().approach_speed, -va.params().min_throttle_frac);

        // A stationary driver is not moved
        va.assist(2.0 * DT, &pose, target(0.0, 0.0), DriveCommand::neutral(), true);
        assert_eq!(va.report().approach_speed, 0.0);
    }

    #[test]
    fn test_throttle_floor_ignored_without_speed_control() {
        let mut va = assistant(false);
        let pose = Pose::default();

        // Slower than the floor, right at the target
        let out = va.assist(0.0, &pose, target(0.0, 0.0), DriveCommand::new(0.1, 0.1), true);
        assert_eq!(va.report().approach_speed, 0.1);
        assert!((out.speed() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_speed_control_far_target() {
        let mut va = assistant(true);
        let pose = Pose::default();

        // Far away the limit is full throttle, so the driver is not limited
        va.assist(0.0, &pose, target(1000.0, 0.0), DriveCommand::new(0.8, 0.8), true);
        let r = va.report();
        assert_eq!(r.max_speed, 1.0);
        assert_eq!(r.approach_speed, 0.8);
    }

    #[test]
    fn test_update_queries_source() {
        let mut va = assistant(false);
        let mut goals = GoalStates::new();
        goals.update(vec![GoalState::new(Vector2d::new(50.0, 0.0), 0.7)]);

        va.update(0.0, &Pose::default(), &goals, DriveCommand::new(0.3, 0.3), true);
        assert_eq!(va.current_goal(), Some(Vector2d::new(50.0, 0.0)));
    }

    #[test]
    fn test_diag_keys() {
        let mut va = assistant(false);
        let mut table = DiagTable::new();

        va.assist(0.0, &Pose::default(), None, DriveCommand::neutral(), false);
        va.log(&mut table);
        assert_eq!(table.get_bool("VisionDriveAssist/foundTarget"), Some(false));
        assert_eq!(table.get_f64("VisionDriveAssist/currentGoal/X"), Some(-999.0));
        assert_eq!(table.get_f64("VisionDriveAssist/currentGoal/Y"), Some(-999.0));
        assert_eq!(table.get_f64("VisionDriveAssist/lookaheadDist"), Some(48.0));

        va.assist(DT, &Pose::default(), target(70.0, 5.0), DriveCommand::neutral(), true);
        va.log(&mut table);
        assert_eq!(table.get_bool("VisionDriveAssist/enabled"), Some(true));
        assert_eq!(table.get_bool("VisionDriveAssist/foundTarget"), Some(true));
        assert_eq!(table.get_f64("VisionDriveAssist/currentGoal/X"), Some(70.0));
        assert_eq!(table.get_f64("VisionDriveAssist/currentGoal/Y"), Some(5.0));
    }

    #[test]
    fn test_state_proc() {
        let mut va = assistant(false);
        let input = AssistInput {
            time_s: 0.0,
            pose: Pose::default(),
            target: target(60.0, 0.0),
            drive_cmd: DriveCommand::new(0.5, 0.5),
            enabled: true,
        };

        let (cmd, report) = va.proc(&input).unwrap();
        assert_eq!(cmd, DriveCommand::new(0.5, 0.5));
        assert!(report.have_goal);
        assert_eq!(report, *va.report());
    }
}
