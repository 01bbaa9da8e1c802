//! Intake arm and roller states

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Roller demand while intaking.
pub const INTAKE_ROLLER_DEMAND: f64 = 0.7;

/// Roller demand while outtaking.
pub const OUTTAKE_ROLLER_DEMAND: f64 = -1.0;

/// Threshold within which the arm is considered at its target position.
///
/// Units: degrees
pub const AT_TARGET_THRESHOLD_DEG: f64 = 5.0;

/// Wider threshold used to start the rollers early while lowering to intake.
///
/// Units: degrees
pub const INTAKE_ROLLER_THRESHOLD_DEG: f64 = 30.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Fixed arm positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmPos {
    Lowered,
    Raised,
    HardStops,
    Calibration,
}

/// Where the arm should be for a given intake state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmTarget {
    /// Hold the arm at a fixed position.
    Fixed(ArmPos),

    /// The arm is driven directly by another subsystem (climbing), there is
    /// no position to hold.
    Dynamic,
}

/// Intake operating states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeState {
    /// Arm raised inside the frame, rollers off.
    Defense,
    /// Arm lowered, rollers pulling cargo in.
    Intake,
    /// Arm raised, rollers ejecting cargo into the hub.
    Outtake,
    /// Arm lowered, rollers ejecting cargo onto the floor.
    OuttakeGround,
    /// Arm driven by the climber.
    Climbing,
    /// Arm held against the hard stops.
    HardStops,
    /// Arm driven slowly to the calibration limit switch.
    Calibrating,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// An intake able to accept state requests.
pub trait IntakeCtrl {
    /// Request a new intake state.
    fn set_state(&mut self, state: IntakeState);

    /// The currently requested state.
    fn state(&self) -> IntakeState;

    /// Measured arm angle.
    ///
    /// Units: degrees
    fn arm_angle_deg(&self) -> f64;

    /// True if the arm is within `threshold_deg` of the given position.
    fn is_at_pos(&self, pos: ArmPos, threshold_deg: f64) -> bool {
        (self.arm_angle_deg() - pos.angle_deg()).abs() < threshold_deg
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmPos {
    /// Arm angle for this position.
    ///
    /// Units: degrees
    pub fn angle_deg(&self) -> f64 {
        match self {
            ArmPos::Lowered => 0.0,
            ArmPos::Raised => 105.0,
            ArmPos::HardStops => 55.0,
            ArmPos::Calibration => 112.0,
        }
    }
}

impl IntakeState {
    pub fn arm_target(&self) -> ArmTarget {
        match self {
            IntakeState::Defense => ArmTarget::Fixed(ArmPos::Raised),
            IntakeState::Intake => ArmTarget::Fixed(ArmPos::Lowered),
            IntakeState::Outtake => ArmTarget::Fixed(ArmPos::Raised),
            IntakeState::OuttakeGround => ArmTarget::Fixed(ArmPos::Lowered),
            IntakeState::Climbing => ArmTarget::Dynamic,
            IntakeState::HardStops => ArmTarget::Fixed(ArmPos::HardStops),
            IntakeState::Calibrating => ArmTarget::Fixed(ArmPos::Calibration),
        }
    }

    /// Roller demand in this state given the current arm angle.
    ///
    /// The rollers only run once the arm is close enough to its target.
    pub fn roller_demand(&self, arm_angle_deg: f64) -> f64 {
        let near = |pos: ArmPos, threshold: f64| (arm_angle_deg - pos.angle_deg()).abs() < threshold;

        match self {
            IntakeState::Intake if near(ArmPos::Lowered, INTAKE_ROLLER_THRESHOLD_DEG) => {
                INTAKE_ROLLER_DEMAND
            }
            IntakeState::Outtake if near(ArmPos::Raised, AT_TARGET_THRESHOLD_DEG) => {
                OUTTAKE_ROLLER_DEMAND
            }
            IntakeState::OuttakeGround if near(ArmPos::Lowered, AT_TARGET_THRESHOLD_DEG) => {
                OUTTAKE_ROLLER_DEMAND
            }
            _ => 0.0,
        }
    }
}

impl Default for IntakeState {
    fn default() -> Self {
        IntakeState::Defense
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_arm_targets() {
        assert_eq!(IntakeState::Defense.arm_target(), ArmTarget::Fixed(ArmPos::Raised));
        assert_eq!(IntakeState::Intake.arm_target(), ArmTarget::Fixed(ArmPos::Lowered));
        assert_eq!(IntakeState::Climbing.arm_target(), ArmTarget::Dynamic);
        assert_eq!(
            IntakeState::Calibrating.arm_target(),
            ArmTarget::Fixed(ArmPos::Calibration)
        );

        match IntakeState::HardStops.arm_target() {
            ArmTarget::Fixed(p) => assert_eq!(p.angle_deg(), 55.0),
            ArmTarget::Dynamic => panic!("Hard stops must have a fixed position"),
        }
    }

    #[test]
    fn test_roller_demand() {
        // Outtake waits for the arm to be raised
        assert_eq!(IntakeState::Outtake.roller_demand(50.0), 0.0);
        assert_eq!(IntakeState::Outtake.roller_demand(104.0), OUTTAKE_ROLLER_DEMAND);

        // Intake starts early while still lowering
        assert_eq!(IntakeState::Intake.roller_demand(25.0), INTAKE_ROLLER_DEMAND);
        assert_eq!(IntakeState::Intake.roller_demand(40.0), 0.0);

        assert_eq!(IntakeState::OuttakeGround.roller_demand(2.0), OUTTAKE_ROLLER_DEMAND);
        assert_eq!(IntakeState::Defense.roller_demand(105.0), 0.0);
        assert_eq!(IntakeState::Climbing.roller_demand(0.0), 0.0);
    }
}
