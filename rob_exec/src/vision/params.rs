//! Vision drive assistant parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the vision drive assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// If true the assistant limits the driver's forward speed so the robot
    /// slows down in front of the target. Otherwise only steering is
    /// assisted.
    pub allow_speed_control: bool,

    /// Maximum pure pursuit lookahead distance.
    ///
    /// Units: inches
    pub lookahead_dist_in: f64,

    /// Speed reached at full throttle, used to convert physical speeds into
    /// throttle fractions.
    ///
    /// Units: inches/second
    pub full_throttle_speed_ins: f64,

    /// Maximum approach speed.
    ///
    /// Units: inches/second
    pub max_speed_ins: f64,

    /// Maximum approach acceleration.
    ///
    /// Units: inches/second^2
    pub max_accel_ins2: f64,

    /// Minimum approach speed, so the driver can still creep onto and past
    /// the target.
    ///
    /// Units: inches/second
    pub min_speed_ins: f64,

    /// Lower bound on the speed limit as a fraction of full throttle. Only
    /// used when speed control is allowed.
    pub min_throttle_frac: f64,

    /// Distance from the robot centre to the front of the intake.
    ///
    /// Units: inches
    pub center_to_intake_in: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            allow_speed_control: false,
            lookahead_dist_in: 48.0,
            full_throttle_speed_ins: 100.0,
            max_speed_ins: 100.0,
            max_accel_ins2: 50.0,
            min_speed_ins: 6.0,
            min_throttle_frac: 0.2,
            center_to_intake_in: 16.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params() {
        let p: Params =
            util::params::from_str(include_str!("../../../params/vision_assist.toml")).unwrap();
        let d = Params::default();

        assert_eq!(p.allow_speed_control, d.allow_speed_control);
        assert_eq!(p.lookahead_dist_in, d.lookahead_dist_in);
        assert_eq!(p.max_accel_ins2, d.max_accel_ins2);
        assert!(p.min_throttle_frac > 0.0 && p.min_throttle_frac <= 1.0);
        assert!(p.full_throttle_speed_ins > 0.0);
    }
}
