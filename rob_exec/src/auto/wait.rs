//! Wait for a fixed duration

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{Action, ActionCtx};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Action finishing once a fixed time has elapsed since it was started.
#[derive(Debug, Clone)]
pub struct WaitAction {
    /// Units: seconds
    duration_s: f64,

    /// Time at which the action was started.
    ///
    /// Units: seconds
    start_time_s: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WaitAction {
    pub fn new(duration_s: f64) -> Self {
        Self {
            duration_s,
            start_time_s: None,
        }
    }
}

impl Action for WaitAction {
    fn start(&mut self, ctx: &mut ActionCtx<'_>) {
        self.start_time_s = Some(ctx.time_s);
    }

    fn run(&mut self, _ctx: &mut ActionCtx<'_>) {}

    fn is_finished(&self, ctx: &ActionCtx<'_>) -> bool {
        match self.start_time_s {
            Some(t) => ctx.time_s - t >= self.duration_s,
            None => false,
        }
    }

    fn done(&mut self, _ctx: &mut ActionCtx<'_>) {}

    fn name(&self) -> String {
        format!("Wait({:.2} s)", self.duration_s)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::action::mock::*;
    use crate::geom::Pose;

    #[test]
    fn test_wait() {
        let mut dt = MockDrivetrain::default();
        let mut intake = MockIntake::default();
        let mut ctx = ActionCtx::new(10.0, Pose::default(), &mut dt, &mut intake);

        let mut wait = WaitAction::new(0.5);
        assert!(!wait.is_finished(&ctx));

        wait.start(&mut ctx);
        assert!(!wait.is_finished(&ctx));

        ctx.time_s = 10.48;
        wait.run(&mut ctx);
        assert!(!wait.is_finished(&ctx));

        ctx.time_s = 10.5;
        assert!(wait.is_finished(&ctx));
    }

    #[test]
    fn test_zero_wait() {
        let mut dt = MockDrivetrain::default();
        let mut intake = MockIntake::default();
        let mut ctx = ActionCtx::new(3.0, Pose::default(), &mut dt, &mut intake);

        let mut wait = WaitAction::new(0.0);
        wait.start(&mut ctx);
        assert!(wait.is_finished(&ctx));
    }
}
