//! Climber sequencing
//!
//! The climb is a fixed sequence of states stepped through by the driver.
//! A bounded history of previous states allows stepping back when a step
//! has to be repeated.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

use super::IntakeState;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of previous states remembered.
pub const CLIMBER_HISTORY_CAPACITY: usize = 8;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Climber states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClimberState {
    Defense,
    ExtendFloor,
    Retract,
    ExtendBar,
    Calibrating,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Climber state machine.
#[derive(Debug, Clone)]
pub struct ClimberFsm {
    current: ClimberState,

    /// Previous states, most recent at the back.
    history: VecDeque<ClimberState>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ClimberState {
    /// The state following this one in the climb sequence.
    pub fn next(&self) -> ClimberState {
        match self {
            ClimberState::Defense => ClimberState::ExtendFloor,
            ClimberState::ExtendFloor => ClimberState::Retract,
            ClimberState::Retract => ClimberState::ExtendBar,
            ClimberState::ExtendBar => ClimberState::Retract,
            ClimberState::Calibrating => ClimberState::Calibrating,
        }
    }

    /// The intake state this climber state forces, if any.
    pub fn intake_demand(&self) -> Option<IntakeState> {
        match self {
            ClimberState::Defense | ClimberState::Calibrating => None,
            _ => Some(IntakeState::Climbing),
        }
    }
}

impl ClimberFsm {
    pub fn new() -> Self {
        Self {
            current: ClimberState::Defense,
            history: VecDeque::with_capacity(CLIMBER_HISTORY_CAPACITY),
        }
    }

    pub fn state(&self) -> ClimberState {
        self.current
    }

    /// Number of states that can be stepped back through.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Move to the given state, recording the current one. Moving to the
    /// current state does nothing.
    pub fn change_state(&mut self, new_state: ClimberState) {
        if new_state == self.current {
            return;
        }

        if self.history.len() == CLIMBER_HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(self.current);

        debug!("Climber: {:?} -> {:?}", self.current, new_state);
        self.current = new_state;
    }

    /// Advance to the next state in the climb sequence.
    pub fn next_state(&mut self) {
        let next = self.current.next();
        self.change_state(next);
    }

    /// Step back to the previous state.
    ///
    /// Returns false, leaving the state unchanged, if there is no history.
    pub fn prev_state(&mut self) -> bool {
        match self.history.pop_back() {
            Some(prev) => {
                debug!("Climber: {:?} back to {:?}", self.current, prev);
                self.current = prev;
                true
            }
            None => false,
        }
    }
}

impl Default for ClimberFsm {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sequence() {
        let mut fsm = ClimberFsm::new();
        assert_eq!(fsm.state(), ClimberState::Defense);

        let expected = [
            ClimberState::ExtendFloor,
            ClimberState::Retract,
            ClimberState::ExtendBar,
            ClimberState::Retract,
            ClimberState::ExtendBar,
        ];
        for &e in expected.iter() {
            fsm.next_state();
            assert_eq!(fsm.state(), e);
        }

        assert_eq!(fsm.state().intake_demand(), Some(IntakeState::Climbing));
        assert_eq!(ClimberState::Defense.intake_demand(), None);
    }

    #[test]
    fn test_calibrating_holds() {
        let mut fsm = ClimberFsm::new();
        fsm.change_state(ClimberState::Calibrating);
        let len = fsm.history_len();

        fsm.next_state();
        assert_eq!(fsm.state(), ClimberState::Calibrating);
        assert_eq!(fsm.history_len(), len);
    }

    #[test]
    fn test_prev_state() {
        let mut fsm = ClimberFsm::new();

        // Nothing to go back to
        assert!(!fsm.prev_state());
        assert_eq!(fsm.state(), ClimberState::Defense);

        fsm.next_state();
        fsm.next_state();
        assert_eq!(fsm.state(), ClimberState::Retract);

        assert!(fsm.prev_state());
        assert_eq!(fsm.state(), ClimberState::ExtendFloor);
        assert!(fsm.prev_state());
        assert_eq!(fsm.state(), ClimberState::Defense);
        assert!(!fsm.prev_state());
        assert_eq!(fsm.state(), ClimberState::Defense);
    }

    #[test]
    fn test_repeat_change_ignored() {
        let mut fsm = ClimberFsm::new();
        fsm.change_state(ClimberState::Defense);
        assert_eq!(fsm.history_len(), 0);
    }

    #[test]
    fn test_history_bounded() {
        let mut fsm = ClimberFsm::new();
        for _ in 0..50 {
            fsm.next_state();
            assert!(fsm.history_len() <= CLIMBER_HISTORY_CAPACITY);
        }
        assert_eq!(fsm.history_len(), CLIMBER_HISTORY_CAPACITY);

        // Can step back exactly as far as the history holds
        let mut steps = 0;
        while fsm.prev_state() {
            steps += 1;
        }
        assert_eq!(steps, CLIMBER_HISTORY_CAPACITY);
    }
}
