//! # Robot library.
//!
//! This library allows the robot executable, benchmarks and tests to access
//! the robot's modules.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Autonomous module - actions, action groups, path following and routines
pub mod auto;

/// Drive module - drive commands and differential drive kinematics
pub mod drive;

/// Geometry primitives - vectors and poses in the field frame
pub mod geom;

/// Executable parameters
pub mod params;

/// Simulated drivetrain, intake and camera
pub mod sim;

/// Speed governor - acceleration and braking distance limited speed
pub mod speed_gov;

/// Subsystems - intake and climber states
pub mod subsystems;

/// Vision module - target observations and the vision drive assistant
pub mod vision;
