//! Request an intake state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{Action, ActionCtx};
use crate::subsystems::IntakeState;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Action requesting a new intake state when started. Finishes immediately,
/// the intake moves to the new state on its own.
#[derive(Debug, Clone)]
pub struct SetIntakeAction {
    state: IntakeState,
    requested: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SetIntakeAction {
    pub fn new(state: IntakeState) -> Self {
        Self {
            state,
            requested: false,
        }
    }
}

impl Action for SetIntakeAction {
    fn start(&mut self, ctx: &mut ActionCtx<'_>) {
        ctx.intake.set_state(self.state);
        self.requested = true;
    }

    fn run(&mut self, _ctx: &mut ActionCtx<'_>) {}

    fn is_finished(&self, _ctx: &ActionCtx<'_>) -> bool {
        self.requested
    }

    fn done(&mut self, _ctx: &mut ActionCtx<'_>) {}

    fn name(&self) -> String {
        format!("SetIntake({:?})", self.state)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
