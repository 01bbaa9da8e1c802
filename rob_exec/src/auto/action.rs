//! # Action protocol
//!
//! An action is a unit of autonomous work, driven through its lifecycle by
//! whatever owns it (the runner or a combinator):
//!
//! 1. `start` once, when the action becomes active,
//! 2. `run` once per tick while active and not finished,
//! 3. `done` once, when finished or when the routine is aborted.
//!
//! `is_finished` may be queried at any point after `start` and must not have
//! side effects. None of these functions may block, they share the tick with
//! the rest of the control loop.
//!
//! Nothing prevents two concurrently active actions commanding the same
//! actuator. Avoiding that is up to whoever composes the routine.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::Debug;

use crate::{drive::Drivetrain, geom::Pose, subsystems::IntakeCtrl};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything an action can see and command during one tick.
pub struct ActionCtx<'a> {
    /// Current time.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Current robot pose in the field frame.
    pub pose: Pose,

    pub drivetrain: &'a mut dyn Drivetrain,
    pub intake: &'a mut dyn IntakeCtrl,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A unit of autonomous work.
pub trait Action: Debug {
    /// One time setup, called when the action becomes active.
    fn start(&mut self, ctx: &mut ActionCtx<'_>);

    /// Advance the action by one tick.
    fn run(&mut self, ctx: &mut ActionCtx<'_>);

    /// True once the action has achieved its goal.
    fn is_finished(&self, ctx: &ActionCtx<'_>) -> bool;

    /// One time teardown, called after the action finishes or is aborted.
    fn done(&mut self, ctx: &mut ActionCtx<'_>);

    /// Short human readable name used in logs.
    fn name(&self) -> String;
}

/// An owned, type erased action.
pub type BoxedAction = Box<dyn Action>;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> ActionCtx<'a> {
    pub fn new(
        time_s: f64,
        pose: Pose,
        drivetrain: &'a mut dyn Drivetrain,
        intake: &'a mut dyn IntakeCtrl,
    ) -> Self {
        Self {
            time_s,
            pose,
            drivetrain,
            intake,
        }
    }
}

// ---------------------------------------------------------------------------
// TEST UTILITIES
// ---------------------------------------------------------------------------

/// Mock collaborators and an instrumented action shared by the auto tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::drive::DriveCommand;
    use crate::subsystems::IntakeState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub struct MockDrivetrain {
        pub cmds: Vec<DriveCommand>,
    }

    impl Drivetrain for MockDrivetrain {
        fn set_drive_cmd(&mut self, cmd: DriveCommand) {
            self.cmds.push(cmd);
        }
    }

    #[derive(Debug, Default)]
    pub struct MockIntake {
        pub states: Vec<IntakeState>,
    }

    impl IntakeCtrl for MockIntake {
        fn set_state(&mut self, state: IntakeState) {
            self.states.push(state);
        }

        fn state(&self) -> IntakeState {
            self.states.last().copied().unwrap_or_default()
        }

        fn arm_angle_deg(&self) -> f64 {
            0.0
        }
    }

    /// A lifecycle event recorded by a `CountingAction`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Start(&'static str),
        Run(&'static str),
        Done(&'static str),
    }

    pub type EventLog = Rc<RefCell<Vec<Event>>>;

    /// Action finishing after a fixed number of `run` calls, recording every
    /// lifecycle call into a shared log.
    #[derive(Debug)]
    pub struct CountingAction {
        pub name: &'static str,
        pub runs_to_finish: usize,
        pub runs: usize,
        pub log: EventLog,
    }

    impl CountingAction {
        pub fn boxed(name: &'static str, runs_to_finish: usize, log: &EventLog) -> BoxedAction {
            Box::new(Self {
                name,
                runs_to_finish,
                runs: 0,
                log: log.clone(),
            })
        }
    }

    impl Action for CountingAction {
        fn start(&mut self, _ctx: &mut ActionCtx<'_>) {
            self.log.borrow_mut().push(Event::Start(self.name));
        }

        fn run(&mut self, _ctx: &mut ActionCtx<'_>) {
            self.runs += 1;
            self.log.borrow_mut().push(Event::Run(self.name));
        }

        fn is_finished(&self, _ctx: &ActionCtx<'_>) -> bool {
            self.runs >= self.runs_to_finish
        }

        fn done(&mut self, _ctx: &mut ActionCtx<'_>) {
            self.log.borrow_mut().push(Event::Done(self.name));
        }

        fn name(&self) -> String {
            self.name.to_string()
        }
    }

    pub fn new_log() -> EventLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    /// Count the events in the log matching the given event.
    pub fn count(log: &EventLog, event: &Event) -> usize {
        log.borrow().iter().filter(|e| *e == event).count()
    }
}
