//! # Subsystems
//!
//! State types for the actuators commanded by the autonomous actions, and
//! the interfaces through which they are commanded. Position control of the
//! actuators themselves is done by their own drivers.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod climber;
pub mod intake;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use climber::{ClimberFsm, ClimberState};
pub use intake::{ArmPos, ArmTarget, IntakeCtrl, IntakeState};
