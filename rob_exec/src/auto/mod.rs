//! # Autonomous module
//!
//! Autonomous behaviour is expressed as a tree of actions: leaves which wait,
//! request subsystem states or follow paths, and groups which run their
//! children in parallel or in series. A routine is a sequence of actions
//! stepped by the [`AutoRunner`] once per control tick.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod action;
pub mod modes;
mod parallel;
mod params;
mod path;
mod path_follower;
mod runner;
mod series;
mod set_intake;
mod wait;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use action::{Action, ActionCtx, BoxedAction};
pub use modes::{AutoRoutine, RoutineKind};
pub use parallel::ParallelAction;
pub use params::AutoParams;
pub use path::*;
pub use path_follower::*;
pub use runner::*;
pub use series::SeriesAction;
pub use set_intake::SetIntakeAction;
pub use wait::WaitAction;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised while setting up an autonomous routine.
#[derive(Debug, thiserror::Error)]
pub enum AutoError {
    #[error("Failed to load AutoParams: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid path: {0}")]
    PathError(PathError),

    #[error("Unknown routine \"{0}\", expected one of one_ball, drive_off, none")]
    UnknownRoutine(String),
}
