//! # Vision module
//!
//! Target observations from the camera pipeline and the vision drive
//! assistant, which steers the robot onto an observed target while the
//! driver holds the assist control.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod assist;
mod goal;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use assist::*;
pub use goal::*;
pub use params::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during vision assist initialisation.
#[derive(Debug, thiserror::Error)]
pub enum VisionAssistError {
    #[error("Could not load the vision assist parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Could not archive the vision assist report: {0}")]
    ArchiveError(util::archive::ArchiveError),
}
