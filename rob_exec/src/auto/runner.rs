//! # Autonomous routine runner
//!
//! Drives a sequence of actions to completion, one action at a time. The
//! runner is stepped once per control tick by the host loop and returns
//! straight away, there is no thread of its own to park.
//!
//! On each step the stop signal is checked first. If set, the active action
//! is done and the rest of the routine is discarded without being started.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{info, warn, Level};
use serde::Serialize;

use super::{Action, ActionCtx, BoxedAction, SeriesAction};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Runner for one autonomous routine.
#[derive(Debug)]
pub struct AutoRunner {
    name: String,
    series: SeriesAction,
    started: bool,
    status: RunnerStatus,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Status of the runner after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunnerStatus {
    /// Actions remain to be run.
    Running,

    /// Every action has finished.
    Finished,

    /// The routine was stopped before it finished.
    Aborted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AutoRunner {
    pub fn new(name: &str, actions: Vec<BoxedAction>) -> Self {
        Self {
            name: name.to_string(),
            series: SeriesAction::with_log_level(actions, Level::Info),
            started: false,
            status: RunnerStatus::Running,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> RunnerStatus {
        self.status
    }

    /// Name of the action currently being run.
    pub fn current_action(&self) -> Option<String> {
        self.series.current_name()
    }

    /// Step the routine by one tick.
    ///
    /// The first step starts the first action, later steps run the active
    /// one. Once finished or aborted further steps do nothing.
    pub fn step(&mut self, ctx: &mut ActionCtx<'_>, should_stop: bool) -> RunnerStatus {
        if self.status != RunnerStatus::Running {
            return self.status;
        }

        if should_stop {
            self.abort(ctx);
            return self.status;
        }

        if self.started {
            self.series.run(ctx);
        } else {
            info!("Starting routine {}", self.name);
            self.series.start(ctx);
            self.started = true;
        }

        if self.series.is_finished(ctx) {
            info!("Routine {} finished", self.name);
            self.status = RunnerStatus::Finished;
        }

        self.status
    }

    /// Step the routine for one tick of an autonomous period ending at
    /// `period_end_s`.
    ///
    /// The first tick at or after the end of the period aborts a routine
    /// which is still running.
    pub fn step_period(&mut self, ctx: &mut ActionCtx<'_>, period_end_s: f64) -> RunnerStatus {
        let should_stop = ctx.time_s >= period_end_s;
        self.step(ctx, should_stop)
    }

    /// Stop the routine, calling `done` on the active action.
    ///
    /// Does nothing if the routine has already finished or been aborted.
    pub fn abort(&mut self, ctx: &mut ActionCtx<'_>) {
        if self.status != RunnerStatus::Running {
            return;
        }

        match self.series.current_name() {
            Some(n) => warn!("Routine {} aborted during {}", self.name, n),
            None => warn!("Routine {} aborted", self.name),
        }

        self.series.done(ctx);
        self.status = RunnerStatus::Aborted;
    }
}

impl RunnerStatus {
    /// True if the runner will do nothing more.
    pub fn is_complete(&self) -> bool {
        *self != RunnerStatus::Running
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
