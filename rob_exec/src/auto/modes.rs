//! # Autonomous routines
//!
//! Each routine is built as a flat sequence of actions for the
//! [`AutoRunner`], together with the pose the robot is placed at on the
//! field before the match.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{fmt, str::FromStr};

use super::{
    AutoError, AutoParams, AutoRunner, BoxedAction, ParallelAction, Path, PathFollowerAction,
    SetIntakeAction, WaitAction, Waypoint,
};
use crate::{
    drive::Kinematics,
    geom::{Pose, Vector2d},
    subsystems::IntakeState,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A routine ready to be run.
#[derive(Debug)]
pub struct AutoRoutine {
    kind: RoutineKind,
    initial_pose: Pose,
    actions: Vec<BoxedAction>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The available routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineKind {
    /// Score the preloaded cargo then back out of the tarmac.
    OneBall,

    /// Back out of the tarmac only.
    DriveOff,

    /// Do nothing.
    None,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the given routine.
pub fn build(
    kind: RoutineKind,
    params: &AutoParams,
    kinematics: Kinematics,
) -> Result<AutoRoutine, AutoError> {
    match kind {
        RoutineKind::OneBall => one_ball(params, kinematics),
        RoutineKind::DriveOff => drive_off(params, kinematics),
        RoutineKind::None => Ok(AutoRoutine {
            kind,
            initial_pose: Pose::default(),
            actions: Vec::new(),
        }),
    }
}

/// Outtake the preloaded cargo into the hub, then raise the intake while
/// reversing out of the tarmac.
pub fn one_ball(params: &AutoParams, kinematics: Kinematics) -> Result<AutoRoutine, AutoError> {
    let initial_pose = Pose::default();
    let reverse_path = drive_off_path(&initial_pose, params)?;

    let actions: Vec<BoxedAction> = vec![
        Box::new(WaitAction::new(params.initial_delay_s)),
        Box::new(SetIntakeAction::new(IntakeState::Outtake)),
        Box::new(WaitAction::new(params.shot_time_s)),
        Box::new(ParallelAction::new(vec![
            Box::new(SetIntakeAction::new(IntakeState::Defense)),
            Box::new(PathFollowerAction::new(reverse_path, kinematics, params)),
        ])),
    ];

    Ok(AutoRoutine {
        kind: RoutineKind::OneBall,
        initial_pose,
        actions,
    })
}

/// Reverse out of the tarmac without scoring.
pub fn drive_off(params: &AutoParams, kinematics: Kinematics) -> Result<AutoRoutine, AutoError> {
    let initial_pose = Pose::default();
    let reverse_path = drive_off_path(&initial_pose, params)?;

    let actions: Vec<BoxedAction> = vec![
        Box::new(WaitAction::new(params.initial_delay_s)),
        Box::new(PathFollowerAction::new(reverse_path, kinematics, params)),
    ];

    Ok(AutoRoutine {
        kind: RoutineKind::DriveOff,
        initial_pose,
        actions,
    })
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Reverse path from the initial position straight back along the field X
/// axis.
fn drive_off_path(initial_pose: &Pose, params: &AutoParams) -> Result<Path, AutoError> {
    let start = initial_pose.position;
    let outside_tarmac = start + Vector2d::new(-params.drive_off_dist_in, 0.0);

    let path = Path::new(vec![
        Waypoint::new(start, params.drive_off_options),
        Waypoint::new(outside_tarmac, params.drive_off_options),
    ])
    .map_err(AutoError::PathError)?;

    Ok(path.with_reverse_direction())
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AutoRoutine {
    pub fn kind(&self) -> RoutineKind {
        self.kind
    }

    /// Pose the robot starts the routine at.
    pub fn initial_pose(&self) -> Pose {
        self.initial_pose
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Hand the actions over to a new runner.
    pub fn into_runner(self) -> AutoRunner {
        AutoRunner::new(&self.kind.to_string(), self.actions)
    }
}

impl FromStr for RoutineKind {
    type Err = AutoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "one_ball" => Ok(RoutineKind::OneBall),
            "drive_off" => Ok(RoutineKind::DriveOff),
            "none" => Ok(RoutineKind::None),
            _ => Err(AutoError::UnknownRoutine(s.to_string())),
        }
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoutineKind::OneBall => "one_ball",
            RoutineKind::DriveOff => "drive_off",
            RoutineKind::None => "none",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
